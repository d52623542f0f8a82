//! Archive fixtures shared by unit and CLI tests

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use npyz::{AutoSerialize, DType, Order, WriteOptions, WriterBuilder};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Encode an NPY entry; `values` are in storage order
pub fn npy_entry<T: AutoSerialize + Copy>(values: &[T], shape: &[u64], order: Order) -> Vec<u8> {
    let mut bytes = Vec::new();
    let mut writer = WriteOptions::<T>::new()
        .default_dtype()
        .shape(shape)
        .order(order)
        .writer(&mut bytes)
        .begin_nd()
        .unwrap();
    writer.extend(values.iter().copied()).unwrap();
    writer.finish().unwrap();
    bytes
}

/// Header of an entry whose data is missing
pub fn npy_header_only<T: AutoSerialize>(shape: &[u64]) -> Vec<u8> {
    let mut bytes = Vec::new();
    let writer = WriteOptions::<T>::new()
        .default_dtype()
        .shape(shape)
        .writer(&mut bytes)
        .begin_nd()
        .unwrap();
    // finish() would reject the missing elements; the header is already written
    drop(writer);
    bytes
}

/// Fixed-width byte strings (`|S<width>`)
pub fn bytes_entry(values: &[&[u8]], width: usize) -> Vec<u8> {
    let dtype = DType::Plain(format!("|S{}", width).parse().unwrap());
    let mut bytes = Vec::new();
    let mut writer = WriteOptions::<[u8]>::new()
        .dtype(dtype)
        .shape(&[values.len() as u64])
        .writer(&mut bytes)
        .begin_nd()
        .unwrap();
    for value in values {
        writer.push(value).unwrap();
    }
    writer.finish().unwrap();
    bytes
}

pub fn i32_entry(values: &[i32], shape: &[u64]) -> Vec<u8> {
    npy_entry(values, shape, Order::C)
}

pub fn f32_entry(values: &[f32], shape: &[u64]) -> Vec<u8> {
    npy_entry(values, shape, Order::C)
}

/// The reserved config entry as Marian writes it: a 1-D int8 array of text bytes
pub fn special_entry(payload: &[u8]) -> Vec<u8> {
    let values: Vec<i8> = payload.iter().map(|&byte| byte as i8).collect();
    npy_entry(&values, &[values.len() as u64], Order::C)
}

/// Write `model.npz` into `dir`
///
/// Names get a `.npy` suffix; `.txt` names are stored as-is.
pub fn write_npz(dir: &Path, entries: &[(&str, Vec<u8>)]) -> PathBuf {
    let path = dir.join("model.npz");
    let mut zip = ZipWriter::new(File::create(&path).unwrap());
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, bytes) in entries {
        let file_name = if name.ends_with(".txt") {
            name.to_string()
        } else {
            npyz::npz::file_name_from_array_name(name)
        };
        zip.start_file(file_name, options).unwrap();
        zip.write_all(bytes).unwrap();
    }
    zip.finish().unwrap();
    path
}

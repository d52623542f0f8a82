//! Arrays read from archive entries
//!
//! NPY headers and element data are read with `npyz`. Elements become
//! [`Scalar`]s held in an `ndarray` array in logical (row-major) order,
//! whatever the storage order of the entry.

use std::fmt;
use std::io::Read;

use ndarray::{ArrayD, IxDyn, ShapeBuilder};
use npyz::{DType, Deserialize, Endianness, NpyFile, NpyHeader, Order, TypeChar};
use thiserror::Error;

/// Errors turning an NPY entry into an array
#[derive(Debug, Error)]
pub enum NpyError {
    #[error("shape {0} has more elements than can be addressed")]
    ShapeOverflow(String),

    #[error("dtype {0} has no numeric element representation")]
    UnsupportedDType(String),

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Dimension sizes of an array
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Shape(Vec<usize>);

impl Shape {
    pub fn new(dims: Vec<usize>) -> Self {
        Self(dims)
    }

    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// Product of all dimensions (1 for a 0-d array), `None` on overflow
    pub fn element_count(&self) -> Option<usize> {
        self.0.iter().try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => f.write_str("()"),
            [only] => write!(f, "({},)", only),
            dims => {
                f.write_str("(")?;
                for (i, dim) in dims.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", dim)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// What an NPY header says about an entry
///
/// Only built through [`ArrayHeader::from_npy`], so the element count
/// always fits in a `usize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayHeader {
    dtype: DType,
    shape: Shape,
    order: Order,
    len: usize,
}

impl ArrayHeader {
    pub fn from_npy(header: &NpyHeader) -> Result<Self, NpyError> {
        let overflow = || NpyError::ShapeOverflow(format!("{:?}", header.shape()));

        let dims = header
            .shape()
            .iter()
            .map(|&dim| usize::try_from(dim).map_err(|_| overflow()))
            .collect::<Result<Vec<_>, _>>()?;
        let shape = Shape::new(dims);
        let len = shape
            .element_count()
            .ok_or_else(|| NpyError::ShapeOverflow(shape.to_string()))?;

        Ok(Self {
            dtype: header.dtype(),
            shape,
            order: header.order(),
            len,
        })
    }

    pub fn dtype(&self) -> &DType {
        &self.dtype
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn fortran_order(&self) -> bool {
        self.order == Order::Fortran
    }

    /// Number of elements
    pub fn element_count(&self) -> usize {
        self.len
    }

    /// numpy's name for the dtype: `float32`, `int8`, `bool`
    ///
    /// Big-endian multi-byte types and non-numeric types keep their
    /// descriptor (`>f8`, `|S5`), the way numpy prints them.
    pub fn dtype_name(&self) -> String {
        let DType::Plain(ty) = &self.dtype else {
            return self.dtype.descr();
        };

        let bits = ty.size_field() * 8;
        match (ty.endianness(), ty.type_char()) {
            (Endianness::Big, _) if ty.size_field() > 1 => ty.to_string(),
            (_, TypeChar::Bool) => "bool".to_string(),
            (_, TypeChar::Int) => format!("int{}", bits),
            (_, TypeChar::Uint) => format!("uint{}", bits),
            (_, TypeChar::Float) => format!("float{}", bits),
            _ => ty.to_string(),
        }
    }
}

/// A single decoded element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    UInt(u64),
    F16(half::f16),
    F32(f32),
    F64(f64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::UInt(v) => write!(f, "{}", v),
            Scalar::F16(v) => write_float(f, v.to_string()),
            Scalar::F32(v) => write_float(f, v.to_string()),
            Scalar::F64(v) => write_float(f, v.to_string()),
        }
    }
}

/// Integral floats get a `.0` so they read as floats
fn write_float(f: &mut fmt::Formatter<'_>, repr: String) -> fmt::Result {
    let integral = repr
        .trim_start_matches('-')
        .chars()
        .all(|c| c.is_ascii_digit());
    if integral {
        write!(f, "{}.0", repr)
    } else {
        f.write_str(&repr)
    }
}

/// A materialized archive entry
#[derive(Debug, Clone)]
pub struct NpyArray {
    header: ArrayHeader,
    values: ArrayD<Scalar>,
}

impl NpyArray {
    /// Read every element of an opened entry
    pub fn read<R: Read>(npy: NpyFile<R>) -> Result<Self, NpyError> {
        let header = ArrayHeader::from_npy(npy.header())?;
        let scalars = read_scalars(npy)?;

        let dims = IxDyn(header.shape.dims());
        let values = match header.order {
            Order::C => ArrayD::from_shape_vec(dims, scalars)?,
            Order::Fortran => ArrayD::from_shape_vec(dims.f(), scalars)?,
        };

        Ok(Self { header, values })
    }

    pub fn header(&self) -> &ArrayHeader {
        &self.header
    }

    pub fn shape(&self) -> &Shape {
        &self.header.shape
    }

    pub fn values(&self) -> &ArrayD<Scalar> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All elements in logical (row-major) order
    pub fn scalars(&self) -> impl Iterator<Item = Scalar> + '_ {
        self.values.iter().copied()
    }
}

/// Summarized nested-bracket representation; large arrays elide their middles
impl fmt::Display for NpyArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.values, f)
    }
}

/// Read a one-byte integer entry (`|i1` or `|u1`) as its raw bytes
pub fn read_bytes<R: Read>(npy: NpyFile<R>) -> Result<Vec<u8>, NpyError> {
    let header = ArrayHeader::from_npy(npy.header())?;
    match plain_kind(header.dtype()) {
        Some((TypeChar::Int, 1)) => Ok(npy
            .into_vec::<i8>()?
            .into_iter()
            .map(|byte| byte as u8)
            .collect()),
        Some((TypeChar::Uint, 1)) => Ok(npy.into_vec::<u8>()?),
        _ => Err(NpyError::UnsupportedDType(header.dtype_name())),
    }
}

fn plain_kind(dtype: &DType) -> Option<(TypeChar, u64)> {
    match dtype {
        DType::Plain(ty) => Some((ty.type_char(), ty.size_field())),
        _ => None,
    }
}

/// Elements in storage order
fn read_scalars<R: Read>(npy: NpyFile<R>) -> Result<Vec<Scalar>, NpyError> {
    let dtype = npy.dtype();
    match plain_kind(&dtype) {
        Some((TypeChar::Bool, 1)) => collect(npy, Scalar::Bool),
        Some((TypeChar::Int, 1)) => collect(npy, |v: i8| Scalar::Int(v.into())),
        Some((TypeChar::Int, 2)) => collect(npy, |v: i16| Scalar::Int(v.into())),
        Some((TypeChar::Int, 4)) => collect(npy, |v: i32| Scalar::Int(v.into())),
        Some((TypeChar::Int, 8)) => collect(npy, Scalar::Int),
        Some((TypeChar::Uint, 1)) => collect(npy, |v: u8| Scalar::UInt(v.into())),
        Some((TypeChar::Uint, 2)) => collect(npy, |v: u16| Scalar::UInt(v.into())),
        Some((TypeChar::Uint, 4)) => collect(npy, |v: u32| Scalar::UInt(v.into())),
        Some((TypeChar::Uint, 8)) => collect(npy, Scalar::UInt),
        Some((TypeChar::Float, 2)) => collect(npy, Scalar::F16),
        Some((TypeChar::Float, 4)) => collect(npy, Scalar::F32),
        Some((TypeChar::Float, 8)) => collect(npy, Scalar::F64),
        _ => Err(NpyError::UnsupportedDType(dtype.descr())),
    }
}

fn collect<T, R, F>(npy: NpyFile<R>, to_scalar: F) -> Result<Vec<Scalar>, NpyError>
where
    T: Deserialize,
    R: Read,
    F: Fn(T) -> Scalar,
{
    let reader = npy
        .data::<T>()
        .map_err(|e| NpyError::UnsupportedDType(e.to_string()))?;
    let scalars = reader
        .map(|value| value.map(&to_scalar))
        .collect::<std::io::Result<Vec<_>>>()?;
    Ok(scalars)
}

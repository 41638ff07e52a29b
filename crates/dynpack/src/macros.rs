//! Fixed-width scalar plumbing shared by the binary writer and reader.

/// Defines the fixed-width scalars of the binary format.
/// Arguments passed to callback:
/// 1. Writer method name
/// 2. Reader method name
/// 3. Rust type (must have `to_be_bytes`/`from_be_bytes`)
/// 4. Width in bytes
macro_rules! for_each_fixed_scalar {
    ($m:ident) => {
        $m!(write_i16,    read_i16,    i16, 2);
        $m!(write_i32,    read_i32,    i32, 4);
        $m!(write_i64,    read_i64,    i64, 8);
        $m!(write_double, read_double, f64, 8);
    };
}

/// Generates big-endian writes into `self.buf`.
macro_rules! encode_fixed {
    ($write:ident, $read:ident, $ty:ty, $width:literal) => {
        #[inline]
        fn $write(&mut self, v: $ty) -> crate::types::Result<()> {
            self.buf.extend_from_slice(&v.to_be_bytes());
            Ok(())
        }
    };
}

/// Generates big-endian reads from `self.cursor`.
macro_rules! decode_fixed {
    ($write:ident, $read:ident, $ty:ty, $width:literal) => {
        #[inline]
        fn $read(&mut self) -> crate::types::Result<$ty> {
            let bytes = self.cursor.read_array::<$width>()?;
            Ok(<$ty>::from_be_bytes(bytes))
        }
    };
}

pub(crate) use for_each_fixed_scalar;
pub(crate) use encode_fixed;
pub(crate) use decode_fixed;

use std::fmt;
use std::num::NonZeroU32;

macro_rules! driver_handle {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Copy, Clone, PartialEq, Eq, Hash)]
        pub struct $name(u32);

        impl $name {
            /// The null handle. The driver never hands it out for a live object.
            pub const NULL: Self = Self(0);

            #[inline]
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            pub const fn is_null(self) -> bool {
                self.0 == 0
            }

            /// Non-zero view of the handle, `None` for [`Self::NULL`].
            #[inline]
            pub fn non_null(self) -> Option<NonZeroU32> {
                NonZeroU32::new(self.0)
            }
        }

        impl From<NonZeroU32> for $name {
            fn from(raw: NonZeroU32) -> Self {
                Self(raw.get())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_null() {
                    write!(f, concat!($label, "(null)"))
                } else {
                    write!(f, concat!($label, "({})"), self.0)
                }
            }
        }
    };
}

driver_handle!(
    /// Driver-owned shader object.
    ShaderHandle,
    "Shader"
);

driver_handle!(
    /// Driver-owned program object.
    ProgramHandle,
    "Program"
);

driver_handle!(
    /// Driver-owned buffer object.
    BufferHandle,
    "Buffer"
);

driver_handle!(
    /// Driver-owned vertex array object.
    VertexArrayHandle,
    "VertexArray"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_handle_is_zero() {
        assert!(ShaderHandle::NULL.is_null());
        assert_eq!(ProgramHandle::NULL.raw(), 0);
        assert!(BufferHandle::NULL.non_null().is_none());
    }

    #[test]
    fn non_zero_handle_round_trips_through_non_null() {
        let h = VertexArrayHandle::from_raw(7);
        assert!(!h.is_null());
        assert_eq!(h.non_null().map(NonZeroU32::get), Some(7));
    }

    #[test]
    fn debug_names_the_object_kind() {
        assert_eq!(format!("{:?}", ShaderHandle::from_raw(3)), "Shader(3)");
        assert_eq!(format!("{:?}", ProgramHandle::NULL), "Program(null)");
    }
}

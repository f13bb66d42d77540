use crate::value::Value;

///
/// IntoKeys
///
/// Accepts key arguments of one to three values: a bare scalar, a tuple,
/// or an explicit vector. Arity checks happen in the service afterwards.
///

pub trait IntoKeys {
    fn into_keys(self) -> Vec<Value>;
}

macro_rules! impl_into_keys_scalar {
    ($($type:ty),* $(,)?) => {
        $(
            impl IntoKeys for $type {
                fn into_keys(self) -> Vec<Value> {
                    vec![self.into()]
                }
            }
        )*
    };
}

impl_into_keys_scalar!(
    bool, i8, i16, i32, i64, u8, u16, u32, u64, String, &str, Value
);

impl<A: Into<Value>, B: Into<Value>> IntoKeys for (A, B) {
    fn into_keys(self) -> Vec<Value> {
        vec![self.0.into(), self.1.into()]
    }
}

impl<A: Into<Value>, B: Into<Value>, C: Into<Value>> IntoKeys for (A, B, C) {
    fn into_keys(self) -> Vec<Value> {
        vec![self.0.into(), self.1.into(), self.2.into()]
    }
}

impl IntoKeys for Vec<Value> {
    fn into_keys(self) -> Vec<Value> {
        self
    }
}

///
/// TESTS
///

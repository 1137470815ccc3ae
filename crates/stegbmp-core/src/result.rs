use crate::error::StegbmpError;

pub type Result<T> = std::result::Result<T, StegbmpError>;

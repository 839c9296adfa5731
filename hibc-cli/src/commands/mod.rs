pub mod decode;
pub mod pair;
pub mod scan;

pub(crate) mod rgb32;

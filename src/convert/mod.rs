pub(crate) mod nv12;
pub(crate) mod yuv;

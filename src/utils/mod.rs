pub mod slice_ext;

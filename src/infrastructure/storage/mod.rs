mod spool_dir;

pub use spool_dir::SpoolDir;

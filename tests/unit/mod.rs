//! Unit tests mirroring the `src` tree, one file per source module

mod io;
mod spatial;

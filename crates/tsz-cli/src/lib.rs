//! Thin host around the front-end compilation core (`spec.md` §1
//! "Deliberately out of scope": the bundler's own CLI/option parsing isn't
//! part of this crate's job — this one just exercises `tsz-core::parse`
//! end to end). See [`driver::run`] and the `tszfe` binary in `src/bin`.

pub mod args;
pub mod driver;

//! Minimal compile-time dependency injection.
//!
//! A provider holds the leaf values (configuration, connected clients) and a
//! cache. Everything else is assembled through [`Build`], usually derived,
//! which recursively builds each field from the same provider. Every built
//! value is cached, so services that appear multiple times in a graph are
//! shared.

extern crate self as folio_di;

pub use folio_di_derive::Build;
pub use typemap::TypeMap;

mod macros;
mod typemap;

pub trait Provider: Sized {
    fn cache(&mut self) -> &mut TypeMap;
}

#[diagnostic::on_unimplemented(
    message = "The type `{Self}` cannot be built using the provider `{P}`",
    note = "Add `{Self}` to the provider `{P}` or implement `Build` for `{Self}` and make sure \
            all dependencies are satisfied"
)]
pub trait Build<P: Provider>: Clone + 'static {
    fn build(provider: &mut P) -> Self;
}

pub trait Provide: Provider {
    fn provide<T: Build<Self>>(&mut self) -> T {
        T::build(self)
    }
}

impl<P: Provider> Provide for P {}

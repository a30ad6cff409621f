//! Device session interface
//!
//! Establishing, authenticating and framing a NETCONF session happens
//! outside this crate. The engine only needs these five blocking calls,
//! issued one at a time through an exclusive borrow.

use crate::errors::Result;
use crate::filter::Filter;
use crate::model::{Datastore, DefaultOperation};

pub trait NetconfSession {
    /// `<get-config>` against `source`, returning the raw reply XML.
    ///
    /// # Errors
    ///
    /// `Transport` for any failure reported by the session.
    fn get_config(&mut self, source: Datastore, filter: &Filter) -> Result<String>;

    /// `<get>` (operational state), returning the raw reply XML.
    ///
    /// # Errors
    ///
    /// `Transport` for any failure reported by the session.
    fn get(&mut self, filter: &Filter) -> Result<String>;

    /// `<edit-config>` with `config` being a complete `<config>` element.
    ///
    /// # Errors
    ///
    /// `Transport` for any failure reported by the session.
    fn edit_config(
        &mut self,
        target: Datastore,
        config: &str,
        default_operation: DefaultOperation,
    ) -> Result<()>;

    /// # Errors
    ///
    /// `Transport` for any failure reported by the session.
    fn commit(&mut self) -> Result<()>;

    /// # Errors
    ///
    /// `Transport` for any failure reported by the session.
    fn discard_changes(&mut self) -> Result<()>;
}

impl<S: NetconfSession + ?Sized> NetconfSession for &mut S {
    fn get_config(&mut self, source: Datastore, filter: &Filter) -> Result<String> {
        (**self).get_config(source, filter)
    }

    fn get(&mut self, filter: &Filter) -> Result<String> {
        (**self).get(filter)
    }

    fn edit_config(
        &mut self,
        target: Datastore,
        config: &str,
        default_operation: DefaultOperation,
    ) -> Result<()> {
        (**self).edit_config(target, config, default_operation)
    }

    fn commit(&mut self) -> Result<()> {
        (**self).commit()
    }

    fn discard_changes(&mut self) -> Result<()> {
        (**self).discard_changes()
    }
}

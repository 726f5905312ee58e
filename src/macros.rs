//! Provides macros that stamp out the operations every facade shares.
//!
//! Each facade wraps a `handle: Handle<dyn Trait>` where the trait extends
//! `IAds`. The macros expand to inherent methods that delegate to the handle,
//! so callers get `name()`, `to_group()` and friends without importing a
//! trait.

/// Expands to the `IADs` accessors, the casts and the lifecycle methods.
///
/// Invoke inside an `impl` block of a struct with a `handle` field.
macro_rules! ads_object_methods {
    () => {
        /// Retrieves the relative name of the object.
        ///
        /// # Errors
        /// Returns [`Error::Closed`](crate::Error::Closed) after
        /// [`close`](Self::close), or the platform error.
        pub fn name(&self) -> crate::Result<String> {
            self.handle.name()
        }

        /// Retrieves the schema class name of the object.
        pub fn class(&self) -> crate::Result<String> {
            self.handle.class()
        }

        /// Retrieves the globally unique identifier of the object.
        ///
        /// # Errors
        /// Returns [`Error::InvalidGuid`](crate::Error::InvalidGuid) if the
        /// provider hands back text that is not a GUID.
        pub fn guid(&self) -> crate::Result<crate::Guid> {
            self.handle.guid()
        }

        /// Retrieves the fully qualified ADsPath of the object.
        pub fn path(&self) -> crate::Result<String> {
            self.handle.path()
        }

        /// Retrieves the ADsPath of the object's parent.
        pub fn parent(&self) -> crate::Result<String> {
            self.handle.parent()
        }

        /// Retrieves the ADsPath of the object's schema class object.
        pub fn schema(&self) -> crate::Result<String> {
            self.handle.schema()
        }

        /// Acquires a container interface for the object.
        ///
        /// The returned handle is independent: closing either one leaves the
        /// other open.
        ///
        /// # Errors
        /// Returns the platform error (usually `E_NOINTERFACE`) if the
        /// object is not a container.
        pub fn to_container(&self) -> crate::Result<crate::Container> {
            self.handle.query_container().map(crate::Container::from_handle)
        }

        /// Acquires a computer interface for the object.
        pub fn to_computer(&self) -> crate::Result<crate::Computer> {
            self.handle.query_computer().map(crate::Computer::from_handle)
        }

        /// Acquires a group interface for the object.
        pub fn to_group(&self) -> crate::Result<crate::Group> {
            self.handle.query_group().map(crate::Group::from_handle)
        }

        ads_handle_lifecycle!();
    };
}

/// Expands to `close` and `is_closed`.
macro_rules! ads_handle_lifecycle {
    () => {
        /// Releases the underlying interface. Calling it again does nothing.
        ///
        /// The handle is closed when this returns, whether or not the
        /// release succeeded; a failure is still reported. Dropping an open
        /// handle closes it too.
        pub fn close(&self) -> crate::Result<()> {
            self.handle.close()
        }

        /// Reports whether [`close`](Self::close) has been called.
        pub fn is_closed(&self) -> bool {
            self.handle.is_closed()
        }
    };
}

/// Expands to string accessors backed by `IADsComputer` properties.
macro_rules! computer_properties {
    ($($(#[$doc:meta])* $method:ident => $property:ident,)*) => {
        $(
            $(#[$doc])*
            pub fn $method(&self) -> crate::Result<String> {
                self.handle
                    .with(|iface| Ok(iface.property(crate::api::ComputerProperty::$property)?))
            }
        )*
    };
}

/// Implements `Debug` for a facade as its type name and open state.
macro_rules! impl_handle_debug {
    ($($ty:ident),*) => {
        $(
            impl std::fmt::Debug for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.debug_struct(stringify!($ty))
                        .field("closed", &self.is_closed())
                        .finish()
                }
            }
        )*
    };
}

//! Provides [`Computer`], the handle for computer accounts.

use crate::api::IAdsComputer;
use crate::handle::Handle;

/// Provides access to a computer object through `IADsComputer`.
pub struct Computer {
    handle: Handle<dyn IAdsComputer>,
}

impl Computer {
    pub(crate) fn from_handle(handle: Handle<dyn IAdsComputer>) -> Self {
        Self { handle }
    }

    /// Wraps an `IADsComputer` implementation in a new handle that owns it.
    pub fn new(iface: Box<dyn IAdsComputer>) -> Self {
        Self::from_handle(Handle::new(iface))
    }

    ads_object_methods!();

    computer_properties! {
        /// Retrieves the globally unique identifier assigned to the computer.
        computer_id => ComputerId,
        /// Retrieves the name of the site the computer belongs to.
        site => Site,
        /// Retrieves the description of the computer.
        description => Description,
        /// Retrieves the physical location of the computer.
        location => Location,
        /// Retrieves the contact person for the computer.
        primary_user => PrimaryUser,
        /// Retrieves the owner of the computer.
        owner => Owner,
        /// Retrieves the division the computer belongs to.
        division => Division,
        /// Retrieves the department the computer belongs to.
        department => Department,
        /// Retrieves the role of the computer, such as server or workstation.
        role => Role,
        /// Retrieves the name of the installed operating system.
        operating_system => OperatingSystem,
        /// Retrieves the version of the installed operating system.
        operating_system_version => OperatingSystemVersion,
        /// Retrieves the make and model of the computer.
        model => Model,
        /// Retrieves the processor type.
        processor => Processor,
        /// Retrieves the number of processors, as text.
        processor_count => ProcessorCount,
        /// Retrieves the memory size in megabytes, as text.
        memory_size => MemorySize,
        /// Retrieves the disk space in megabytes, as text.
        storage_capacity => StorageCapacity,
    }
}

impl_handle_debug!(Computer);

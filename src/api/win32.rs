//! Implements the ADSI interfaces over the `windows` crate bindings.
//!
//! Every wrapper owns its interface references; dropping a wrapper releases
//! them. Wrappers that expose an interface not derived from `IADs` keep an
//! `IADs` reference alongside it for the shared accessors.

use std::mem::ManuallyDrop;

use windows::core::{BSTR, GUID, HRESULT, PWSTR};
use windows::Win32::Foundation::S_FALSE;
use windows::Win32::Networking::ActiveDirectory::{
    IADs, IADsComputer, IADsContainer, IADsGroup, IADsOpenDSObject,
};
use windows::Win32::System::Com::{
    CoCreateInstance, CoCreateInstanceEx, CLSCTX_REMOTE_SERVER, CLSCTX_SERVER, COSERVERINFO,
    MULTI_QI,
};
use windows::Win32::System::Ole::IEnumVARIANT;
use windows::Win32::System::Variant::VARIANT;
use windows_core::{IUnknown, Interface};

use super::{
    AuthFlags, ComputerProperty, IAds as AdsObject, IAdsComputer as AdsComputer,
    IAdsContainer as AdsContainer, IAdsGroup as AdsGroup, IAdsOpenDsObject as AdsOpenDsObject,
    PlatformResult, Release,
};
use crate::error::{hresult, PlatformError};
use crate::guid::Guid;

fn text(value: windows::core::Result<BSTR>) -> PlatformResult<String> {
    Ok(value?.to_string())
}

/// Wraps every element of an `IEnumVARIANT` as an `IADs` object.
fn enumerate(unknown: IUnknown) -> PlatformResult<Vec<Box<dyn AdsObject>>> {
    let items: IEnumVARIANT = unknown.cast()?;
    let mut objects: Vec<Box<dyn AdsObject>> = Vec::new();
    loop {
        let mut batch = [VARIANT::default()];
        let mut fetched = 0u32;
        let hr = unsafe { items.Next(&mut batch, &mut fetched) };
        hr.ok()?;
        if fetched == 0 {
            break;
        }
        let object: IADs = IUnknown::try_from(&batch[0])?.cast()?;
        objects.push(Box::new(Object::new(object)));
        if hr == S_FALSE {
            break;
        }
    }
    Ok(objects)
}

// ---------------------------------------------------------------------------
// Wrappers
// ---------------------------------------------------------------------------

// SAFETY (all wrappers): every interface is created and used in the
// multithreaded apartment. Wrappers are only built inside `com::run`, which
// refuses to run on a thread that belongs to a single-threaded apartment, so
// no wrapper ever holds an STA-bound pointer. MTA pointers may be called
// from any thread that is itself in the MTA; every call goes through
// `com::run` and every release through `com::release`, which both put the
// calling thread there first.

struct Object {
    object: IADs,
}

unsafe impl Send for Object {}

impl Object {
    fn new(object: IADs) -> Self {
        Self { object }
    }
}

struct Container {
    object: IADs,
    container: IADsContainer,
}

unsafe impl Send for Container {}

struct Computer {
    object: IADs,
    computer: IADsComputer,
}

unsafe impl Send for Computer {}

struct Group {
    object: IADs,
    group: IADsGroup,
}

unsafe impl Send for Group {}

struct OpenDsObject(IADsOpenDSObject);

unsafe impl Send for OpenDsObject {}

impl Release for Object {}
impl Release for Container {}
impl Release for Computer {}
impl Release for Group {}
impl Release for OpenDsObject {}

macro_rules! impl_ads_object {
    ($($ty:ty),*) => {
        $(
            impl AdsObject for $ty {
                fn name(&self) -> PlatformResult<String> {
                    text(unsafe { self.object.Name() })
                }

                fn class(&self) -> PlatformResult<String> {
                    text(unsafe { self.object.Class() })
                }

                fn guid(&self) -> PlatformResult<String> {
                    text(unsafe { self.object.GUID() })
                }

                fn ads_path(&self) -> PlatformResult<String> {
                    text(unsafe { self.object.ADsPath() })
                }

                fn parent(&self) -> PlatformResult<String> {
                    text(unsafe { self.object.Parent() })
                }

                fn schema(&self) -> PlatformResult<String> {
                    text(unsafe { self.object.Schema() })
                }

                fn query_container(&self) -> PlatformResult<Box<dyn AdsContainer>> {
                    Ok(Box::new(Container {
                        container: self.object.cast()?,
                        object: self.object.clone(),
                    }))
                }

                fn query_computer(&self) -> PlatformResult<Box<dyn AdsComputer>> {
                    Ok(Box::new(Computer {
                        computer: self.object.cast()?,
                        object: self.object.clone(),
                    }))
                }

                fn query_group(&self) -> PlatformResult<Box<dyn AdsGroup>> {
                    Ok(Box::new(Group {
                        group: self.object.cast()?,
                        object: self.object.clone(),
                    }))
                }
            }
        )*
    };
}

impl_ads_object!(Object, Container, Computer, Group);

impl AdsContainer for Container {
    fn children(&self) -> PlatformResult<Vec<Box<dyn AdsObject>>> {
        enumerate(unsafe { self.container._NewEnum() }?)
    }

    fn get_object(&self, class: &str, relative_name: &str) -> PlatformResult<Box<dyn AdsObject>> {
        let dispatch = unsafe {
            self.container
                .GetObject(&BSTR::from(class), &BSTR::from(relative_name))
        }?;
        Ok(Box::new(Object::new(dispatch.cast()?)))
    }
}

impl AdsComputer for Computer {
    fn property(&self, property: ComputerProperty) -> PlatformResult<String> {
        let c = &self.computer;
        text(unsafe {
            match property {
                ComputerProperty::ComputerId => c.ComputerID(),
                ComputerProperty::Site => c.Site(),
                ComputerProperty::Description => c.Description(),
                ComputerProperty::Location => c.Location(),
                ComputerProperty::PrimaryUser => c.PrimaryUser(),
                ComputerProperty::Owner => c.Owner(),
                ComputerProperty::Division => c.Division(),
                ComputerProperty::Department => c.Department(),
                ComputerProperty::Role => c.Role(),
                ComputerProperty::OperatingSystem => c.OperatingSystem(),
                ComputerProperty::OperatingSystemVersion => c.OperatingSystemVersion(),
                ComputerProperty::Model => c.Model(),
                ComputerProperty::Processor => c.Processor(),
                ComputerProperty::ProcessorCount => c.ProcessorCount(),
                ComputerProperty::MemorySize => c.MemorySize(),
                ComputerProperty::StorageCapacity => c.StorageCapacity(),
            }
        })
    }
}

impl AdsGroup for Group {
    fn description(&self) -> PlatformResult<String> {
        text(unsafe { self.group.Description() })
    }

    fn members(&self) -> PlatformResult<Vec<Box<dyn AdsObject>>> {
        let members = unsafe { self.group.Members() }?;
        enumerate(unsafe { members._NewEnum() }?)
    }

    fn is_member(&self, path: &str) -> PlatformResult<bool> {
        let member = unsafe { self.group.IsMember(&BSTR::from(path)) }?;
        Ok(member.0 != 0)
    }

    fn add(&self, path: &str) -> PlatformResult<()> {
        Ok(unsafe { self.group.Add(&BSTR::from(path)) }?)
    }

    fn remove(&self, path: &str) -> PlatformResult<()> {
        Ok(unsafe { self.group.Remove(&BSTR::from(path)) }?)
    }
}

impl AdsOpenDsObject for OpenDsObject {
    fn open_ds_object(
        &self,
        path: &str,
        username: Option<&str>,
        password: Option<&str>,
        flags: AuthFlags,
    ) -> PlatformResult<Box<dyn AdsObject>> {
        // An empty BSTR is a null pointer, which binds as the caller.
        let username = username.map(BSTR::from).unwrap_or_default();
        let password = password.map(BSTR::from).unwrap_or_default();
        let dispatch = unsafe {
            self.0.OpenDSObject(
                &BSTR::from(path),
                &username,
                &password,
                flags.bits() as i32,
            )
        }?;
        Ok(Box::new(Object::new(dispatch.cast()?)))
    }
}

// ---------------------------------------------------------------------------
// Object creation
// ---------------------------------------------------------------------------

pub(crate) fn create_remote_object(
    server: Option<&str>,
    clsid: &Guid,
) -> PlatformResult<Box<dyn AdsOpenDsObject>> {
    let _scoped = crate::com::enter()?;
    let clsid = GUID::from(*clsid);
    let iface: IADsOpenDSObject = match server.filter(|host| !host.is_empty()) {
        None => unsafe { CoCreateInstance(&clsid, None, CLSCTX_SERVER) }?,
        Some(host) => {
            let mut name: Vec<u16> = host.encode_utf16().chain(Some(0)).collect();
            let info = COSERVERINFO {
                pwszName: PWSTR(name.as_mut_ptr()),
                ..Default::default()
            };
            let mut results = [MULTI_QI {
                pIID: &IADsOpenDSObject::IID,
                pItf: ManuallyDrop::new(None),
                hr: HRESULT(0),
            }];
            unsafe {
                CoCreateInstanceEx(
                    &clsid,
                    None,
                    CLSCTX_REMOTE_SERVER,
                    Some(&info as *const COSERVERINFO),
                    &mut results,
                )
            }?;
            let [result] = results;
            result.hr.ok()?;
            ManuallyDrop::into_inner(result.pItf)
                .ok_or_else(|| PlatformError::from_code(hresult::E_NOINTERFACE))?
                .cast()?
        }
    };
    Ok(Box::new(OpenDsObject(iface)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        CLSID_LDAP_NAMESPACE, IID_IADS, IID_IADS_COMPUTER, IID_IADS_CONTAINER, IID_IADS_GROUP,
        IID_IADS_MEMBERS, IID_IADS_OPEN_DS_OBJECT,
    };
    use windows::Win32::Networking::ActiveDirectory::{IADsMembers, LDAPNamespace};

    #[test]
    fn test_identifiers_match_bindings() {
        assert_eq!(IID_IADS, Guid::from(IADs::IID));
        assert_eq!(IID_IADS_CONTAINER, Guid::from(IADsContainer::IID));
        assert_eq!(IID_IADS_COMPUTER, Guid::from(IADsComputer::IID));
        assert_eq!(IID_IADS_GROUP, Guid::from(IADsGroup::IID));
        assert_eq!(IID_IADS_MEMBERS, Guid::from(IADsMembers::IID));
        assert_eq!(IID_IADS_OPEN_DS_OBJECT, Guid::from(IADsOpenDSObject::IID));
        assert_eq!(CLSID_LDAP_NAMESPACE, Guid::from(LDAPNamespace));
    }
}

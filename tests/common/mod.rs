//! Mock ADSI platform layer shared by the integration tests.
//!
//! One [`MockObject`] implements every interface trait; the flags decide
//! which casts succeed. All clones of a mock share one [`Counter`], which
//! counts platform calls and interface releases.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use adsi::api::{
    ComputerProperty, IAds, IAdsComputer, IAdsContainer, IAdsGroup, IAdsOpenDsObject,
    PlatformResult, Release,
};
use adsi::error::hresult;
use adsi::{AuthFlags, PlatformError};

/// Counts what the handles did to the platform.
#[derive(Default)]
pub struct Counter {
    calls: AtomicUsize,
    releases: AtomicUsize,
}

impl Counter {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Clone)]
pub struct MockObject {
    pub name: String,
    pub class: String,
    pub guid: String,
    pub is_container: bool,
    pub is_computer: bool,
    pub is_group: bool,
    pub failure: Option<i32>,
    pub release_failure: Option<i32>,
    pub panics: bool,
    pub delay: Option<Duration>,
    pub children: Vec<String>,
    pub members: Arc<Mutex<Vec<String>>>,
    pub counter: Arc<Counter>,
}

pub fn path_of(name: &str) -> String {
    format!("LDAP://CN={name},DC=example,DC=com")
}

impl MockObject {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            class: "user".to_owned(),
            guid: "{0C7D4B8A-9E21-4F6B-A3C5-1D2E3F405162}".to_owned(),
            is_container: false,
            is_computer: false,
            is_group: false,
            failure: None,
            release_failure: None,
            panics: false,
            delay: None,
            children: Vec::new(),
            members: Arc::new(Mutex::new(Vec::new())),
            counter: Arc::new(Counter::default()),
        }
    }

    pub fn with_guid(mut self, guid: &str) -> Self {
        self.guid = guid.to_owned();
        self
    }

    pub fn container(mut self, children: &[&str]) -> Self {
        self.class = "organizationalUnit".to_owned();
        self.is_container = true;
        self.children = children.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn computer(mut self) -> Self {
        self.class = "computer".to_owned();
        self.is_computer = true;
        self
    }

    pub fn group(mut self, members: &[&str]) -> Self {
        self.class = "group".to_owned();
        self.is_group = true;
        self.members = Arc::new(Mutex::new(members.iter().map(|m| path_of(m)).collect()));
        self
    }

    pub fn failing(mut self, code: i32) -> Self {
        self.failure = Some(code);
        self
    }

    /// The interface reports `code` when released.
    pub fn failing_release(mut self, code: i32) -> Self {
        self.release_failure = Some(code);
        self
    }

    /// Every platform call panics.
    pub fn panicking(mut self) -> Self {
        self.panics = true;
        self
    }

    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn call<T>(&self, value: impl FnOnce() -> T) -> PlatformResult<T> {
        self.counter.hit();
        if self.panics {
            panic!("platform call panicked");
        }
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        match self.failure {
            Some(code) => Err(PlatformError::from_code(code)),
            None => Ok(value()),
        }
    }

    fn cast(&self, supported: bool) -> PlatformResult<Self> {
        self.counter.hit();
        if supported {
            Ok(self.clone())
        } else {
            Err(PlatformError::from_code(hresult::E_NOINTERFACE))
        }
    }
}

impl Drop for MockObject {
    fn drop(&mut self) {
        self.counter.releases.fetch_add(1, Ordering::SeqCst);
    }
}

impl Release for MockObject {
    fn release(self: Box<Self>) -> PlatformResult<()> {
        match self.release_failure {
            Some(code) => Err(PlatformError::from_code(code)),
            None => Ok(()),
        }
    }
}

impl IAds for MockObject {
    fn name(&self) -> PlatformResult<String> {
        self.call(|| self.name.clone())
    }

    fn class(&self) -> PlatformResult<String> {
        self.call(|| self.class.clone())
    }

    fn guid(&self) -> PlatformResult<String> {
        self.call(|| self.guid.clone())
    }

    fn ads_path(&self) -> PlatformResult<String> {
        self.call(|| path_of(&self.name))
    }

    fn parent(&self) -> PlatformResult<String> {
        self.call(|| "LDAP://DC=example,DC=com".to_owned())
    }

    fn schema(&self) -> PlatformResult<String> {
        self.call(|| format!("LDAP://schema/{}", self.class))
    }

    fn query_container(&self) -> PlatformResult<Box<dyn IAdsContainer>> {
        Ok(Box::new(self.cast(self.is_container)?))
    }

    fn query_computer(&self) -> PlatformResult<Box<dyn IAdsComputer>> {
        Ok(Box::new(self.cast(self.is_computer)?))
    }

    fn query_group(&self) -> PlatformResult<Box<dyn IAdsGroup>> {
        Ok(Box::new(self.cast(self.is_group)?))
    }
}

impl IAdsContainer for MockObject {
    fn children(&self) -> PlatformResult<Vec<Box<dyn IAds>>> {
        self.call(|| {
            self.children
                .iter()
                .map(|name| Box::new(MockObject::new(name)) as Box<dyn IAds>)
                .collect()
        })
    }

    fn get_object(&self, class: &str, relative_name: &str) -> PlatformResult<Box<dyn IAds>> {
        self.counter.hit();
        let name = relative_name.trim_start_matches("CN=");
        if self.children.iter().any(|child| child == name) {
            let mut child = MockObject::new(name);
            child.class = class.to_owned();
            Ok(Box::new(child))
        } else {
            Err(PlatformError::from_code(hresult::E_ADS_NO_SUCH_OBJECT))
        }
    }
}

impl IAdsComputer for MockObject {
    fn property(&self, property: ComputerProperty) -> PlatformResult<String> {
        self.call(|| format!("{property:?}"))
    }
}

impl IAdsGroup for MockObject {
    fn description(&self) -> PlatformResult<String> {
        self.call(|| format!("{} members", self.name))
    }

    fn members(&self) -> PlatformResult<Vec<Box<dyn IAds>>> {
        let paths = self.members.lock().unwrap().clone();
        self.call(|| {
            paths
                .iter()
                .map(|path| {
                    let name = path
                        .trim_start_matches("LDAP://CN=")
                        .split(',')
                        .next()
                        .unwrap_or_default();
                    Box::new(MockObject::new(name)) as Box<dyn IAds>
                })
                .collect()
        })
    }

    fn is_member(&self, path: &str) -> PlatformResult<bool> {
        let found = self.members.lock().unwrap().iter().any(|m| m == path);
        self.call(|| found)
    }

    fn add(&self, path: &str) -> PlatformResult<()> {
        self.call(|| self.members.lock().unwrap().push(path.to_owned()))
    }

    fn remove(&self, path: &str) -> PlatformResult<()> {
        self.call(|| self.members.lock().unwrap().retain(|m| m != path))
    }
}

/// A recorded `OpenDSObject` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Bind {
    pub path: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub flags: AuthFlags,
}

#[derive(Clone, Default)]
pub struct MockNamespace {
    pub binds: Arc<Mutex<Vec<Bind>>>,
    pub counter: Arc<Counter>,
}

impl Drop for MockNamespace {
    fn drop(&mut self) {
        self.counter.releases.fetch_add(1, Ordering::SeqCst);
    }
}

impl Release for MockNamespace {}

impl IAdsOpenDsObject for MockNamespace {
    fn open_ds_object(
        &self,
        path: &str,
        username: Option<&str>,
        password: Option<&str>,
        flags: AuthFlags,
    ) -> PlatformResult<Box<dyn IAds>> {
        self.counter.hit();
        self.binds.lock().unwrap().push(Bind {
            path: path.to_owned(),
            username: username.map(str::to_owned),
            password: password.map(str::to_owned),
            flags,
        });
        let name = path
            .strip_prefix("LDAP://CN=")
            .and_then(|rest| rest.split(',').next())
            .ok_or_else(|| PlatformError::from_code(hresult::E_ADS_BAD_PATHNAME))?;
        Ok(Box::new(MockObject::new(name)))
    }
}

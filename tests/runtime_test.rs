//! Process-wide runtime accounting.
//!
//! Kept to a single test in its own binary: the runtime is global, and
//! parallel tests would see each other's handles.

mod common;

use adsi::com::runtime;
use adsi::Object;

use common::MockObject;

#[test]
fn test_runtime_follows_live_handles() {
    let runtime = runtime::global();
    assert_eq!(runtime.active(), 0);
    assert!(!runtime.is_running());

    let object = Object::new(Box::new(MockObject::new("Servers").container(&["web01"])));
    assert_eq!(runtime.active(), 1);
    assert!(runtime.is_running());

    let container = object.to_container().unwrap();
    let children = container.children().unwrap();
    assert_eq!(runtime.active(), 3);

    object.close().unwrap();
    object.close().unwrap();
    assert_eq!(runtime.active(), 2);

    drop(children);
    assert_eq!(runtime.active(), 1);
    assert!(runtime.is_running());

    container.close().unwrap();
    assert_eq!(runtime.active(), 0);
    assert!(!runtime.is_running());

    drop(container);
    assert_eq!(runtime.active(), 0);
}

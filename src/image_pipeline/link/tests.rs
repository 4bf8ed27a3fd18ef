use std::time::Duration;

use crate::image_pipeline::common::error::CaptureError;
use crate::image_pipeline::link::SerialPortLink;

#[test]
fn test_open_missing_device() {
    let result = SerialPortLink::open(
        "/dev/epuck-capture-missing",
        2_000_000,
        Duration::from_millis(10),
    );

    let err = match result {
        Ok(_) => panic!("opened a device that does not exist"),
        Err(e) => e,
    };
    assert!(matches!(
        err,
        CaptureError::DeviceUnavailable { ref port, .. } if port == "/dev/epuck-capture-missing"
    ));
    assert!(!err.is_retryable());
}

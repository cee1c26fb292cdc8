//! Fake-driver tests for the client call paths.
//!
//! The fake locator hands out instrumented connections that record every
//! call and count open/close pairs, so the per-operation lifecycle contract
//! (fresh connection, exactly one close, on every exit path) is observable.

use std::sync::{Arc, Mutex};

use foohid_client::{CallError, ClientError, Connection, HidClient, ListStatus, ServiceLocator};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Create {
        name: Vec<u8>,
        descriptor: Vec<u8>,
        serial: Vec<u8>,
        vendor_id: u32,
        product_id: u32,
    },
    Destroy {
        name: Vec<u8>,
    },
    Send {
        name: Vec<u8>,
        report: Vec<u8>,
    },
    List {
        capacity: usize,
    },
}

#[derive(Default)]
struct DriverLog {
    opens: usize,
    closes: usize,
    calls: Vec<Call>,
}

/// Scripted driver behavior.
#[derive(Clone, Default)]
struct FakeDriver {
    /// Names LIST packs into the caller's buffer.
    devices: Vec<&'static str>,
    /// When set, every call fails with this status.
    fail_status: Option<i32>,
}

struct FakeLocator {
    driver: FakeDriver,
    log: Arc<Mutex<DriverLog>>,
}

impl ServiceLocator for FakeLocator {
    fn open(&self) -> Result<Box<dyn Connection>, ClientError> {
        self.log.lock().unwrap().opens += 1;
        Ok(Box::new(FakeConnection {
            driver: self.driver.clone(),
            log: Arc::clone(&self.log),
        }))
    }
}

struct FakeConnection {
    driver: FakeDriver,
    log: Arc<Mutex<DriverLog>>,
}

impl FakeConnection {
    fn status(&self, operation: &'static str) -> Result<(), CallError> {
        match self.driver.fail_status {
            Some(status) => Err(CallError { operation, status }),
            None => Ok(()),
        }
    }

    fn packed_names(&self) -> Vec<u8> {
        let mut packed = Vec::new();
        for name in &self.driver.devices {
            packed.extend_from_slice(name.as_bytes());
            packed.push(0);
        }
        packed
    }
}

impl Connection for FakeConnection {
    fn create(
        &mut self,
        name: &[u8],
        descriptor: &[u8],
        serial: &[u8],
        vendor_id: u32,
        product_id: u32,
    ) -> Result<(), CallError> {
        self.log.lock().unwrap().calls.push(Call::Create {
            name: name.to_vec(),
            descriptor: descriptor.to_vec(),
            serial: serial.to_vec(),
            vendor_id,
            product_id,
        });
        self.status("CREATE")
    }

    fn destroy(&mut self, name: &[u8]) -> Result<(), CallError> {
        self.log.lock().unwrap().calls.push(Call::Destroy {
            name: name.to_vec(),
        });
        self.status("DESTROY")
    }

    fn send(&mut self, name: &[u8], report: &[u8]) -> Result<(), CallError> {
        self.log.lock().unwrap().calls.push(Call::Send {
            name: name.to_vec(),
            report: report.to_vec(),
        });
        self.status("SEND")
    }

    fn list(&mut self, buf: &mut [u8]) -> Result<ListStatus, CallError> {
        self.log.lock().unwrap().calls.push(Call::List {
            capacity: buf.len(),
        });
        self.status("LIST")?;

        let packed = self.packed_names();
        if packed.len() > buf.len() {
            return Ok(ListStatus {
                required_size: packed.len() as u64,
                count: 0,
            });
        }
        buf[..packed.len()].copy_from_slice(&packed);
        Ok(ListStatus {
            required_size: 0,
            count: self.driver.devices.len() as u64,
        })
    }
}

impl Drop for FakeConnection {
    fn drop(&mut self) {
        self.log.lock().unwrap().closes += 1;
    }
}

fn client_with(driver: FakeDriver) -> (HidClient, Arc<Mutex<DriverLog>>) {
    let log = Arc::new(Mutex::new(DriverLog::default()));
    let client = HidClient::with_locator(Box::new(FakeLocator {
        driver,
        log: Arc::clone(&log),
    }));
    (client, log)
}

#[test]
fn create_issues_one_call_with_exact_fields() {
    let (client, log) = client_with(FakeDriver::default());

    client
        .create_device("dev1", &[0x05, 0x01, 0x09, 0x02], "SN1", 2, 3)
        .unwrap();

    let log = log.lock().unwrap();
    assert_eq!(log.opens, 1);
    assert_eq!(log.closes, 1);
    assert_eq!(
        log.calls,
        vec![Call::Create {
            name: b"dev1".to_vec(),
            descriptor: vec![0x05, 0x01, 0x09, 0x02],
            serial: b"SN1".to_vec(),
            vendor_id: 2,
            product_id: 3,
        }]
    );
}

#[test]
fn empty_arguments_never_reach_the_driver() {
    let (client, log) = client_with(FakeDriver::default());

    let cases = [
        client.create_device("", &[1], "SN1", 2, 3).unwrap_err(),
        client.create_device("dev1", &[], "SN1", 2, 3).unwrap_err(),
        client.create_device("dev1", &[1], "", 2, 3).unwrap_err(),
        client.destroy_device("").unwrap_err(),
        client.send_report("", &[1]).unwrap_err(),
        client.send_report("dev1", &[]).unwrap_err(),
    ];
    for err in cases {
        assert!(matches!(err, ClientError::InvalidArgument(_)), "{err}");
    }

    let log = log.lock().unwrap();
    assert_eq!(log.opens, 0);
    assert_eq!(log.closes, 0);
    assert!(log.calls.is_empty());
}

#[test]
fn destroy_and_send_round_trip() {
    let (client, log) = client_with(FakeDriver::default());

    client.destroy_device("dev1").unwrap();
    client.send_report("dev1", &[0, 5, 251]).unwrap();

    let log = log.lock().unwrap();
    assert_eq!(log.opens, 2);
    assert_eq!(log.closes, 2);
    assert_eq!(
        log.calls,
        vec![
            Call::Destroy {
                name: b"dev1".to_vec()
            },
            Call::Send {
                name: b"dev1".to_vec(),
                report: vec![0, 5, 251],
            },
        ]
    );
}

#[test]
fn driver_failure_maps_to_operation_message_and_still_closes() {
    let (client, log) = client_with(FakeDriver {
        fail_status: Some(-536_870_206),
        ..Default::default()
    });

    let err = client
        .create_device("dev1", &[0x05, 0x01], "SN1", 2, 3)
        .unwrap_err();
    assert_eq!(err.to_string(), "unable to create device");

    let err = client.destroy_device("dev1").unwrap_err();
    assert_eq!(err.to_string(), "unable to destroy device");

    let err = client.send_report("dev1", &[1]).unwrap_err();
    assert_eq!(err.to_string(), "unable to send report");

    let err = client.list_devices().unwrap_err();
    assert_eq!(err.to_string(), "unable to list devices");

    let log = log.lock().unwrap();
    assert_eq!(log.opens, 4);
    assert_eq!(log.closes, 4);
}

#[test]
fn list_negotiates_in_two_round_trips() {
    let (client, log) = client_with(FakeDriver {
        devices: vec!["alpha", "beta"],
        ..Default::default()
    });

    // "alpha\0beta\0" is 11 bytes; a 4-byte buffer forces one probe round.
    let names = client.list_devices_with_capacity(4).unwrap();
    assert_eq!(names, ["alpha", "beta"]);

    let log = log.lock().unwrap();
    assert_eq!(log.opens, 2, "one connection per negotiation round");
    assert_eq!(log.closes, 2);
    assert_eq!(
        log.calls,
        vec![Call::List { capacity: 4 }, Call::List { capacity: 11 }]
    );
}

#[test]
fn list_converges_from_pathological_capacity() {
    let driver = FakeDriver {
        devices: vec!["alpha", "beta", "gamma"],
        ..Default::default()
    };

    let (client, _) = client_with(driver.clone());
    let from_one_byte = client.list_devices_with_capacity(1).unwrap();

    let (client, log) = client_with(driver);
    let from_default = client.list_devices().unwrap();

    assert_eq!(from_one_byte, from_default);
    assert_eq!(from_one_byte, ["alpha", "beta", "gamma"]);

    // The default 4096-byte buffer fits without a probe round.
    let log = log.lock().unwrap();
    assert_eq!(log.opens, 1);
    assert_eq!(log.closes, 1);
}

#[test]
fn list_with_no_devices_is_empty() {
    let (client, log) = client_with(FakeDriver::default());

    assert!(client.list_devices().unwrap().is_empty());

    let log = log.lock().unwrap();
    assert_eq!(log.opens, 1);
    assert_eq!(log.closes, 1);
}

#[test]
fn unavailable_service_propagates() {
    struct NoService;
    impl ServiceLocator for NoService {
        fn open(&self) -> Result<Box<dyn Connection>, ClientError> {
            Err(ClientError::ServiceUnavailable)
        }
    }

    let client = HidClient::with_locator(Box::new(NoService));
    for err in [
        client.create_device("dev1", &[1], "SN1", 2, 3).unwrap_err(),
        client.destroy_device("dev1").unwrap_err(),
        client.send_report("dev1", &[1]).unwrap_err(),
        client.list_devices().unwrap_err(),
    ] {
        assert!(matches!(err, ClientError::ServiceUnavailable), "{err}");
    }
}

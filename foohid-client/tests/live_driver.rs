//! Round trips against the real driver.
//!
//! These tests require macOS with the foohid kext loaded.
//! Run with: cargo test -p foohid-client --test live_driver -- --ignored

#![cfg(target_os = "macos")]

use foohid_client::HidClient;

// Minimal mouse descriptor shell, enough for the driver to accept.
const DESCRIPTOR: [u8; 12] = [
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x02, // Usage (Mouse)
    0xA1, 0x01, // Collection (Application)
    0x09, 0x01, //   Usage (Pointer)
    0xA1, 0x00, //   Collection (Physical)
    0xC0, //   End Collection
    0xC0, // End Collection
];

#[test]
#[ignore] // requires the foohid kext
fn create_list_destroy_round_trip() {
    let client = HidClient::new();
    let name = "foohid-client-test";

    client
        .create_device(name, &DESCRIPTOR, "SN-TEST", 2, 3)
        .expect("create failed; is the foohid kext loaded?");

    let names = client.list_devices().expect("list failed");
    assert!(names.iter().any(|n| n == name), "{names:?}");

    client.destroy_device(name).expect("destroy failed");
}

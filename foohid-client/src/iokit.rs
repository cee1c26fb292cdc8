//! IOKit bindings and the real driver backend
//!
//! The driver registers one IOService named [`protocol::SERVICE_NAME`];
//! opening a user client against it yields an `io_connect_t` through which
//! the scalar calls are issued. The bindings below are the handful of
//! IOKitLib entry points the protocol needs, declared locally and linked
//! against the framework.

#![allow(non_camel_case_types, non_snake_case)]

use std::ffi::CStr;
use std::ptr;

use libc::{c_char, c_void};
use tracing::{debug, warn};

use crate::error::{CallError, ClientError};
use crate::protocol::{self, selector};
use crate::service::{Connection, ListStatus, ServiceLocator};

type mach_port_t = u32;
type kern_return_t = i32;
type io_object_t = mach_port_t;
type io_iterator_t = io_object_t;
type io_service_t = io_object_t;
type io_connect_t = io_object_t;

const KERN_SUCCESS: kern_return_t = 0;
const IO_OBJECT_NULL: io_object_t = 0;
/// The NULL master port selects the default registry.
const MASTER_PORT_DEFAULT: mach_port_t = 0;

const SERVICE_NAME_C: &CStr = c"it_unbit_foohid";

#[link(name = "IOKit", kind = "framework")]
extern "C" {
    fn IOServiceMatching(name: *const c_char) -> *mut c_void;
    fn IOServiceGetMatchingServices(
        master_port: mach_port_t,
        matching: *mut c_void,
        existing: *mut io_iterator_t,
    ) -> kern_return_t;
    fn IOIteratorNext(iterator: io_iterator_t) -> io_object_t;
    fn IOObjectRelease(object: io_object_t) -> kern_return_t;
    fn IOServiceOpen(
        service: io_service_t,
        owning_task: mach_port_t,
        connect_type: u32,
        connect: *mut io_connect_t,
    ) -> kern_return_t;
    fn IOServiceClose(connect: io_connect_t) -> kern_return_t;
    fn IOConnectCallScalarMethod(
        connection: io_connect_t,
        selector: u32,
        input: *const u64,
        input_cnt: u32,
        output: *mut u64,
        output_cnt: *mut u32,
    ) -> kern_return_t;
}

extern "C" {
    static mach_task_self_: mach_port_t;
}

fn task_self() -> mach_port_t {
    unsafe { mach_task_self_ }
}

/// Locates the foohid IOService through the registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct IoKitLocator;

impl IoKitLocator {
    pub fn new() -> Self {
        Self
    }
}

impl ServiceLocator for IoKitLocator {
    /// Scan the matching services in registry order and connect to the first
    /// one that accepts. Every enumerated reference is released, including
    /// the ones that refused.
    fn open(&self) -> Result<Box<dyn Connection>, ClientError> {
        let matching = unsafe { IOServiceMatching(SERVICE_NAME_C.as_ptr()) };
        if matching.is_null() {
            warn!("IOServiceMatching returned no dictionary");
            return Err(ClientError::ServiceUnavailable);
        }

        // The matching dictionary is consumed by the registry query.
        let mut iterator: io_iterator_t = IO_OBJECT_NULL;
        let ret = unsafe {
            IOServiceGetMatchingServices(MASTER_PORT_DEFAULT, matching, &mut iterator)
        };
        if ret != KERN_SUCCESS {
            warn!(status = ret, "service registry query failed");
            return Err(ClientError::ServiceUnavailable);
        }

        loop {
            let service = unsafe { IOIteratorNext(iterator) };
            if service == IO_OBJECT_NULL {
                break;
            }

            let mut conn: io_connect_t = IO_OBJECT_NULL;
            let ret = unsafe { IOServiceOpen(service, task_self(), 0, &mut conn) };
            unsafe { IOObjectRelease(service) };

            if ret == KERN_SUCCESS {
                unsafe { IOObjectRelease(iterator) };
                debug!("opened {} connection", protocol::SERVICE_NAME);
                return Ok(Box::new(IoKitConnection { conn }));
            }
            debug!(status = ret, "service instance refused connection");
        }

        unsafe { IOObjectRelease(iterator) };
        warn!("no {} instance accepted a connection", protocol::SERVICE_NAME);
        Err(ClientError::ServiceUnavailable)
    }
}

/// An open user-client connection to the driver.
struct IoKitConnection {
    conn: io_connect_t,
}

impl IoKitConnection {
    fn call(&mut self, sel: u32, input: &[u64], output: &mut [u64]) -> Result<(), CallError> {
        let mut output_cnt = output.len() as u32;
        let (output_ptr, output_cnt_ptr) = if output.is_empty() {
            (ptr::null_mut(), ptr::null_mut())
        } else {
            (output.as_mut_ptr(), &mut output_cnt as *mut u32)
        };

        debug!(selector = selector::name(sel), words = input.len(), "issuing scalar call");
        let ret = unsafe {
            IOConnectCallScalarMethod(
                self.conn,
                sel,
                input.as_ptr(),
                input.len() as u32,
                output_ptr,
                output_cnt_ptr,
            )
        };
        if ret != KERN_SUCCESS {
            return Err(CallError {
                operation: selector::name(sel),
                status: ret,
            });
        }
        Ok(())
    }
}

impl Connection for IoKitConnection {
    fn create(
        &mut self,
        name: &[u8],
        descriptor: &[u8],
        serial: &[u8],
        vendor_id: u32,
        product_id: u32,
    ) -> Result<(), CallError> {
        let input = protocol::encode_create(name, descriptor, serial, vendor_id, product_id);
        self.call(selector::CREATE, &input, &mut [])
    }

    fn destroy(&mut self, name: &[u8]) -> Result<(), CallError> {
        let input = protocol::encode_destroy(name);
        self.call(selector::DESTROY, &input, &mut [])
    }

    fn send(&mut self, name: &[u8], report: &[u8]) -> Result<(), CallError> {
        let input = protocol::encode_send(name, report);
        self.call(selector::SEND, &input, &mut [])
    }

    fn list(&mut self, buf: &mut [u8]) -> Result<ListStatus, CallError> {
        let input = protocol::encode_list(buf);
        let mut output = [0u64; protocol::LIST_OUTPUT_WORDS];
        self.call(selector::LIST, &input, &mut output)?;
        Ok(ListStatus {
            required_size: output[0],
            count: output[1],
        })
    }
}

impl Drop for IoKitConnection {
    fn drop(&mut self) {
        unsafe { IOServiceClose(self.conn) };
    }
}

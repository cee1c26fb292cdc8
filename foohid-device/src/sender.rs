//! Persistent send path
//!
//! The baseline contract opens and closes a connection per call, which is
//! the right default but wasted work for high-rate report streams (a mouse
//! emitting hundreds of reports a second). `ReportSender` keeps one
//! connection open for its whole lifetime and reuses it for every send.
//!
//! The driver's guarantees for a handle shared across threads are
//! undocumented, so all issuance goes through a mutex; the sender is safe to
//! share, at the cost of serializing sends.

use foohid_client::{ClientError, Connection, HidClient};
use parking_lot::Mutex;
use tracing::warn;
use zerocopy::{Immutable, IntoBytes};

use crate::error::DeviceError;

/// A long-lived connection bound to one device name.
pub struct ReportSender {
    name: String,
    conn: Mutex<Box<dyn Connection>>,
}

impl std::fmt::Debug for ReportSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportSender")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl ReportSender {
    /// Open one connection and bind it to `name` for all later sends.
    pub fn open(client: &HidClient, name: &str) -> Result<Self, DeviceError> {
        if name.is_empty() {
            return Err(DeviceError::EmptyField("name"));
        }
        let conn = client.open_connection()?;
        Ok(Self {
            name: name.to_owned(),
            conn: Mutex::new(conn),
        })
    }

    /// Device name the sender is bound to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Feed one raw report through the persistent connection.
    pub fn send(&self, report: &[u8]) -> Result<(), DeviceError> {
        if report.is_empty() {
            return Err(ClientError::InvalidArgument("report").into());
        }
        let mut conn = self.conn.lock();
        conn.send(self.name.as_bytes(), report).map_err(|err| {
            warn!(%err, name = %self.name, "SEND rejected");
            DeviceError::Client(ClientError::DriverCallFailed("unable to send report"))
        })
    }

    /// Feed one typed report through the persistent connection.
    pub fn send_report<R: IntoBytes + Immutable>(&self, report: &R) -> Result<(), DeviceError> {
        self.send(report.as_bytes())
    }

    /// Close the connection. Dropping the sender has the same effect.
    pub fn close(self) {}
}

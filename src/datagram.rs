use autd3::core::geometry::Geometry;

use crate::native::DatagramPtr;

/// A command that can be sent through a [`Recorder`](crate::Recorder).
///
/// Implementors hand over a command handle built by the datagram API. The handle is consumed by
/// the send.
pub trait Datagram {
    /// Builds the native command for `geometry`.
    fn datagram_ptr(self, geometry: &Geometry) -> DatagramPtr;
}

impl Datagram for DatagramPtr {
    fn datagram_ptr(self, _: &Geometry) -> DatagramPtr {
        self
    }
}

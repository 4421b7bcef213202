//! Ports of the provider subsystem: inbound API traits implemented by the
//! service, outbound gateways implemented by the transport stack.

pub mod inbound;
pub mod outbound;

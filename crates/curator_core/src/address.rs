//! Packed network address encoding for uploader origins.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use curator_error::{ValidationError, ValidationErrorKind};

/// Pack an address into 4 (IPv4) or 16 (IPv6) bytes.
pub fn pack_address(address: &IpAddr) -> Vec<u8> {
    match address {
        IpAddr::V4(v4) => v4.octets().to_vec(),
        IpAddr::V6(v6) => v6.octets().to_vec(),
    }
}

/// Unpack an address stored by [`pack_address`].
///
/// # Errors
///
/// Returns `InvalidAddress` for any length other than 4 or 16.
#[track_caller]
pub fn unpack_address(bytes: &[u8]) -> Result<IpAddr, ValidationError> {
    if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
        return Ok(IpAddr::V4(Ipv4Addr::from(octets)));
    }
    if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
        return Ok(IpAddr::V6(Ipv6Addr::from(octets)));
    }
    Err(ValidationError::new(ValidationErrorKind::InvalidAddress(
        format!("{} packed bytes", bytes.len()),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_families_round_trip() {
        for text in ["127.0.0.1", "::1", "2001:db8::ff00:42:8329"] {
            let address: IpAddr = text.parse().unwrap();
            assert_eq!(unpack_address(&pack_address(&address)).unwrap(), address);
        }
    }

    #[test]
    fn odd_lengths_are_rejected() {
        assert!(unpack_address(&[127, 0, 0]).is_err());
        assert!(unpack_address(&[]).is_err());
    }
}

use crate::utils::error::ProbeError;

const CRC16_MODBUS_INIT: u16 = 0xFFFF;
const CRC16_MODBUS_POLY: u16 = 0xA001;

/// CRC-16/MODBUS over `data`, bit by bit. An empty slice yields `0xFFFF`.
pub fn crc16_modbus(data: &[u8]) -> u16 {
    let mut crc = CRC16_MODBUS_INIT;

    for &byte in data {
        crc ^= byte as u16;
        for _ in 0..8 {
            if crc & 0x0001 != 0 {
                crc = (crc >> 1) ^ CRC16_MODBUS_POLY;
            } else {
                crc >>= 1;
            }
        }
    }
    crc
}

/// Checksum of a frame that may be absent. Only a missing sequence is an error;
/// a present but empty one gives the untouched initial register.
pub fn checksum(frame: Option<&[u8]>) -> Result<u16, ProbeError> {
    frame.map(crc16_modbus).ok_or(ProbeError::InvalidInput)
}

/// Wire order of a checksum: low byte first.
pub fn crc_bytes(crc: u16) -> [u8; 2] {
    crc.to_le_bytes()
}

/// Returns `frame` followed by its two checksum bytes.
pub fn with_crc(frame: &[u8]) -> Vec<u8> {
    let mut framed = Vec::with_capacity(frame.len() + 2);
    framed.extend_from_slice(frame);
    framed.extend_from_slice(&crc_bytes(crc16_modbus(frame)));
    framed
}

pub fn append_crc(frame: &mut Vec<u8>) {
    let crc = crc16_modbus(frame);
    frame.extend_from_slice(&crc_bytes(crc));
}

/// Checks the trailing little-endian checksum of a framed command and returns it.
pub fn verify_crc(framed: &[u8]) -> Result<u16, ProbeError> {
    if framed.len() < 3 {
        return Err(ProbeError::FrameTooShort(framed.len()));
    }

    let data_len = framed.len() - 2;
    let received = u16::from_le_bytes([framed[data_len], framed[data_len + 1]]);
    let expected = crc16_modbus(&framed[..data_len]);

    if received != expected {
        return Err(ProbeError::CrcMismatch { expected, received });
    }
    Ok(received)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE_FRAME: [u8; 5] = [0x01, 0xFA, 0x0E, 0x01, 0x00];

    #[test]
    fn test_reference_frame_golden() {
        assert_eq!(crc16_modbus(&REFERENCE_FRAME), 0x4B49);
    }

    #[test]
    fn test_single_byte_vectors() {
        assert_eq!(crc16_modbus(&[0x00]), 0x40BF);
        assert_eq!(crc16_modbus(&[0xFF]), 0x00FF);
    }

    #[test]
    fn test_standard_check_value() {
        assert_eq!(crc16_modbus(b"123456789"), 0x4B37);
    }

    #[test]
    fn test_read_holding_registers_request() {
        // 01 03 00 00 00 0A C5 CD
        let request = [0x01, 0x03, 0x00, 0x00, 0x00, 0x0A];
        assert_eq!(with_crc(&request), vec![0x01, 0x03, 0x00, 0x00, 0x00, 0x0A, 0xC5, 0xCD]);
    }

    #[test]
    fn test_empty_sequence_is_initial_register() {
        assert_eq!(crc16_modbus(&[]), 0xFFFF);
        assert_eq!(checksum(Some(&[][..])).unwrap(), 0xFFFF);
    }

    #[test]
    fn test_absent_sequence_is_invalid_input() {
        assert!(matches!(checksum(None), Err(ProbeError::InvalidInput)));
    }

    #[test]
    fn test_deterministic() {
        let frames: [&[u8]; 4] = [&REFERENCE_FRAME, &[0x00], b"123456789", &[0xAA; 64]];
        for frame in frames {
            assert_eq!(crc16_modbus(frame), crc16_modbus(frame));
            assert_eq!(checksum(Some(frame)).unwrap(), crc16_modbus(frame));
        }
    }

    #[test]
    fn test_append_grows_by_two_low_byte_first() {
        for frame in [&REFERENCE_FRAME[..], &[0x00][..], &[][..], &b"123456789"[..]] {
            let crc = crc16_modbus(frame);
            let framed = with_crc(frame);
            assert_eq!(framed.len(), frame.len() + 2);
            assert_eq!(&framed[..frame.len()], frame);
            assert_eq!(framed[frame.len()], (crc & 0xFF) as u8);
            assert_eq!(framed[frame.len() + 1], (crc >> 8) as u8);

            let mut in_place = frame.to_vec();
            append_crc(&mut in_place);
            assert_eq!(in_place, framed);
        }
    }

    #[test]
    fn test_input_not_mutated() {
        let frame = REFERENCE_FRAME.to_vec();
        let _ = with_crc(&frame);
        assert_eq!(frame, REFERENCE_FRAME.to_vec());
    }

    #[test]
    fn test_single_bit_flips_change_checksum() {
        let original = crc16_modbus(&REFERENCE_FRAME);
        let mut changed = 0;

        for byte in 0..REFERENCE_FRAME.len() {
            for bit in 0..8 {
                let mut mutated = REFERENCE_FRAME;
                mutated[byte] ^= 1 << bit;
                if crc16_modbus(&mutated) != original {
                    changed += 1;
                }
            }
        }

        // CRC-16 detects every single-bit error
        assert_eq!(changed, REFERENCE_FRAME.len() * 8);
    }

    #[test]
    fn test_verify_accepts_framed_output() {
        let framed = with_crc(&REFERENCE_FRAME);
        assert_eq!(framed, vec![0x01, 0xFA, 0x0E, 0x01, 0x00, 0x49, 0x4B]);
        assert_eq!(verify_crc(&framed).unwrap(), 0x4B49);
    }

    #[test]
    fn test_verify_rejects_corruption() {
        let mut framed = with_crc(&REFERENCE_FRAME);
        framed[2] ^= 0x01;
        match verify_crc(&framed) {
            Err(ProbeError::CrcMismatch { received, .. }) => assert_eq!(received, 0x4B49),
            other => panic!("expected CRC mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_verify_rejects_short_frames() {
        assert!(matches!(verify_crc(&[0x01, 0x02]), Err(ProbeError::FrameTooShort(2))));
        assert!(matches!(verify_crc(&[]), Err(ProbeError::FrameTooShort(0))));
    }
}

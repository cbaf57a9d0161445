use cryowurst::frame::SUBPACKET_LEN;

/// Raw field values for a synthetic sub-packet.
#[derive(Debug, Clone, Default)]
pub struct RawPacket {
    pub timestamp: i32,
    pub logger_temp: f32,
    pub logger_pressure: i32,
    pub logger_voltage: i16,
    pub channel_number: u8,
    pub uid: u32,
    pub tmp_temp: i16,
    pub mag: [u16; 3],
    pub imu: [i16; 3],
    pub tilt: [i16; 3],
    pub tilt_pitch: i16,
    pub tilt_roll: i16,
    pub ec: u16,
    pub pressure: u16,
    /// Bytes 57, 58 and 59, shared by keller_temp and wurst_voltage
    pub tail: [u8; 3],
}

impl RawPacket {
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = vec![0u8; SUBPACKET_LEN];
        buf[0..2].copy_from_slice(b"W2");
        buf[2..6].copy_from_slice(&self.timestamp.to_le_bytes());
        buf[6..10].copy_from_slice(&self.logger_temp.to_le_bytes());
        buf[10..14].copy_from_slice(&self.logger_pressure.to_le_bytes());
        buf[14..16].copy_from_slice(&self.logger_voltage.to_le_bytes());
        buf[16] = self.channel_number;
        buf[21..25].copy_from_slice(&self.uid.to_le_bytes());
        buf[28..30].copy_from_slice(&self.tmp_temp.to_le_bytes());
        for (i, v) in self.mag.iter().enumerate() {
            buf[30 + 2 * i..32 + 2 * i].copy_from_slice(&v.to_le_bytes());
        }
        for (i, v) in self.imu.iter().enumerate() {
            buf[36 + 2 * i..38 + 2 * i].copy_from_slice(&v.to_le_bytes());
        }
        for (i, v) in self.tilt.iter().enumerate() {
            buf[42 + 2 * i..44 + 2 * i].copy_from_slice(&v.to_le_bytes());
        }
        buf[48..50].copy_from_slice(&self.tilt_pitch.to_le_bytes());
        buf[50..52].copy_from_slice(&self.tilt_roll.to_le_bytes());
        buf[52..54].copy_from_slice(&self.ec.to_le_bytes());
        buf[54..56].copy_from_slice(&self.pressure.to_le_bytes());
        buf[57..60].copy_from_slice(&self.tail);
        buf
    }
}

/// Hex encode the concatenation of `packets`.
pub fn message(packets: &[RawPacket]) -> String {
    let dat: Vec<u8> = packets.iter().flat_map(RawPacket::encode).collect();
    hex::encode(dat)
}

/// A two-byte request sent to the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub opcode: i8,
    pub parameter: i8,
}

impl Command {
    /// Opcodes are the negated ASCII letter of the request.
    pub const CAPTURE_IMAGE: i8 = -(b'I' as i8);

    pub const fn new(opcode: i8, parameter: i8) -> Self {
        Self { opcode, parameter }
    }

    pub const fn capture_image() -> Self {
        Self::new(Self::CAPTURE_IMAGE, 0)
    }

    /// Big-endian pair of two's-complement bytes.
    pub fn encode(&self) -> [u8; 2] {
        let [op] = self.opcode.to_be_bytes();
        let [param] = self.parameter.to_be_bytes();
        [op, param]
    }
}

pub trait SliceExt {
    type Elem;
    fn xor_each(&mut self, value: Self::Elem);
}

impl SliceExt for [u8] {
    type Elem = u8;

    fn xor_each(&mut self, value: u8) {
        for elem in self {
            *elem ^= value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_each() {
        let mut bytes = [0x00u8, 0xff, 0x36];
        bytes.xor_each(0x36);
        assert_eq!(bytes, [0x36, 0xc9, 0x00]);
    }
}

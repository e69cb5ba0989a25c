use bitflags::bitflags;

bitflags! {
    /// Flags indicating what aspects of rendering need to be updated
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ChangeFlags: u8 {
        /// Widget needs layout recalculation (size/position may change)
        const NEEDS_LAYOUT = 0b01;
        /// Widget needs repainting (visual appearance changed)
        const NEEDS_PAINT  = 0b10;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_compose() {
        let flags = ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT;
        assert!(flags.contains(ChangeFlags::NEEDS_LAYOUT));
        assert!(flags.contains(ChangeFlags::NEEDS_PAINT));
    }

    #[test]
    fn test_remove_single_flag() {
        let mut flags = ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT;
        flags.remove(ChangeFlags::NEEDS_LAYOUT);
        assert!(!flags.contains(ChangeFlags::NEEDS_LAYOUT));
        assert!(flags.contains(ChangeFlags::NEEDS_PAINT));
    }
}

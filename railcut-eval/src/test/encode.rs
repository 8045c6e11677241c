use crate::SplitCode;
use test_log::test;

#[test]
fn test_pack_round_trip() {
    let samples = [
        SplitCode { myu: 0, shared_mask: 0, bound_mask: 0 },
        SplitCode { myu: 2, shared_mask: 0, bound_mask: 0b0111 },
        SplitCode { myu: 4, shared_mask: 0x20, bound_mask: 0x00_F0F0 },
        SplitCode { myu: 0xFFFF, shared_mask: 0xFF_FFFF, bound_mask: 0xFF_FFFF },
    ];
    for code in samples {
        assert_eq!(SplitCode::unpack(code.pack()), code);
    }
}

#[test]
fn test_zero_means_no_fit() {
    let code = SplitCode { myu: 0, shared_mask: 0, bound_mask: 0 };
    assert_eq!(code.pack(), 0);
}

#[test]
fn test_field_layout() {
    let code = SplitCode { myu: 3, shared_mask: 0b110000, bound_mask: 0b1011 };
    let word = code.pack();
    assert_eq!(word & 0xFF_FFFF, 0b1011);
    assert_eq!((word >> 24) & 0xFF_FFFF, 0b110000);
    assert_eq!(word >> 48, 3);
}

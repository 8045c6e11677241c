mod error;
mod truth;

#[cfg(test)]
mod test;

pub use error::{bad_input, invariant, Error, ErrorKind, Result};
pub use truth::{
    ceil_log2, tt_and_sharp, tt_elementary, tt_exchange_vars, tt_from_hex, tt_get_bit,
    tt_get_byte, tt_get_half, tt_get_hex, tt_get_qua, tt_get_u32, tt_intersect, tt_move_var,
    tt_set_bit, tt_stretch_word, tt_swap_vars, tt_to_hex, tt_word_num, MAX_TT_VARS, TRUTH6,
};

//! Run-length encoding of packed glyph data.
//!
//! Each run of repeated bytes is written as a count byte followed by the
//! repeated value. The one exception is a run of a single zero byte, which is
//! written as a lone `0x00`; since no run can have a length of zero this is
//! never ambiguous.
//!
//! Runs are limited to 255 bytes. Longer runs are split, and if the split
//! leaves a single zero byte behind it uses the escape form.

/// The longest run that fits in a count byte.
pub const MAX_RUN_LEN: usize = u8::MAX as usize;

/// A single encoded run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Run {
    /// A single zero byte, written as `0x00`.
    Zero,
    /// `count` copies of `value`, written as `[count, value]`.
    Repeat { count: u8, value: u8 },
}

impl Run {
    /// The number of bytes this run occupies in the encoded stream.
    pub fn compute_size(&self) -> usize {
        match self {
            Run::Zero => 1,
            Run::Repeat { .. } => 2,
        }
    }

    /// The number of input bytes this run represents.
    pub fn decoded_len(&self) -> usize {
        match self {
            Run::Zero => 1,
            Run::Repeat { count, .. } => *count as usize,
        }
    }

    fn write_into(&self, out: &mut Vec<u8>) {
        match *self {
            Run::Zero => out.push(0),
            Run::Repeat { count, value } => out.extend([count, value]),
        }
    }
}

/// Split `bytes` into runs.
pub fn iter_runs(bytes: &[u8]) -> impl Iterator<Item = Run> + '_ {
    let mut bytes = bytes;
    std::iter::from_fn(move || {
        let value = *bytes.first()?;
        let len = bytes
            .iter()
            .take(MAX_RUN_LEN)
            .take_while(|b| **b == value)
            .count();
        bytes = &bytes[len..];
        if len == 1 && value == 0 {
            Some(Run::Zero)
        } else {
            Some(Run::Repeat {
                count: len as u8,
                value,
            })
        }
    })
}

/// Encode `bytes`.
pub fn encode(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(bytes));
    for run in iter_runs(bytes) {
        run.write_into(&mut out);
    }
    out
}

/// Compute the number of bytes required to encode `bytes`.
pub fn encoded_len(bytes: &[u8]) -> usize {
    iter_runs(bytes).map(|run| run.compute_size()).sum()
}

/// Reverse [`encode`]; glyph data is only ever decoded on the device, this
/// is used to check our output.
#[cfg(test)]
pub(crate) fn decode(encoded: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut bytes = encoded.iter().copied();
    while let Some(count) = bytes.next() {
        if count == 0 {
            out.push(0);
        } else {
            let value = bytes.next().expect("truncated run");
            out.extend(std::iter::repeat_n(value, count as usize));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn single_zero_is_escaped() {
        assert_eq!(encode(&[0x00]), vec![0x00]);
    }

    #[test]
    fn two_zeros_are_a_run() {
        assert_eq!(encode(&[0x00, 0x00]), vec![0x02, 0x00]);
    }

    #[test]
    fn simple_runs() {
        assert_eq!(encode(&[0x05, 0x05, 0x05]), vec![0x03, 0x05]);
        assert_eq!(encode(&[0x01, 0x02, 0x02]), vec![0x01, 0x01, 0x02, 0x02]);
    }

    #[test]
    fn lone_nonzero_is_not_escaped() {
        assert_eq!(encode(&[0x00, 0x07, 0x00]), vec![0x00, 0x01, 0x07, 0x00]);
    }

    #[test]
    fn empty_input() {
        assert!(encode(&[]).is_empty());
        assert_eq!(iter_runs(&[]).count(), 0);
    }

    #[test]
    fn long_runs_are_split() {
        let bytes = vec![0xAA; MAX_RUN_LEN * 2 + 3];
        assert_eq!(
            iter_runs(&bytes).collect::<Vec<_>>(),
            vec![
                Run::Repeat {
                    count: u8::MAX,
                    value: 0xAA
                },
                Run::Repeat {
                    count: u8::MAX,
                    value: 0xAA
                },
                Run::Repeat {
                    count: 3,
                    value: 0xAA
                },
            ]
        );
    }

    #[test]
    fn split_leaves_single_zero() {
        let zeros = vec![0; MAX_RUN_LEN + 1];
        assert_eq!(encode(&zeros), vec![0xFF, 0x00, 0x00]);
        assert_eq!(decode(&encode(&zeros)), zeros);
    }

    #[test]
    fn encoded_len_matches() {
        let bytes = [0, 0, 1, 0, 3, 3, 3, 3, 0];
        assert_eq!(encoded_len(&bytes), encode(&bytes).len());
        let decoded_len: usize = iter_runs(&bytes).map(|run| run.decoded_len()).sum();
        assert_eq!(decoded_len, bytes.len());
    }

    #[test]
    fn round_trip() {
        let inputs: &[&[u8]] = &[
            &[],
            &[0],
            &[0, 0],
            &[0, 1, 0, 1, 0],
            &[0xFF, 0xFF, 0x00, 0x18, 0x18, 0x18, 0x00, 0x00, 0x00],
        ];
        for input in inputs {
            assert_eq!(&decode(&encode(input)), input);
        }
        let mixed = (0..1000u32).map(|i| (i / 300) as u8).collect::<Vec<_>>();
        assert_eq!(decode(&encode(&mixed)), mixed);
    }
}

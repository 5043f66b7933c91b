#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use splicebuf::{Buffer, BufferError, BufferOptions, GrowthPolicy};

#[derive(Debug, Arbitrary)]
struct Input {
    doubling: bool,
    first: Vec<u8>,
    second: Vec<u8>,
    start: u16,
    end: u16,
    step: i8,
}

/// The bytes a stride walk should visit, using the standard library's ranges.
/// `None` when the walk cannot make progress.
fn reference_indices(start: usize, end: usize, step: isize) -> Option<Vec<usize>> {
    if step == 0 || start == end || (step < 0) != (start > end) {
        return None;
    }
    let magnitude = step.unsigned_abs();
    Some(if step > 0 {
        (start..end).step_by(magnitude).collect()
    } else {
        (end + 1..=start).rev().step_by(magnitude).collect()
    })
}

fn check(input: Input) {
    let growth = if input.doubling {
        GrowthPolicy::Doubling
    } else {
        GrowthPolicy::Exact
    };
    let mut buffer = Buffer::with_options(BufferOptions {
        growth,
        ..Default::default()
    })
    .unwrap();

    // Two sets so that Doubling buffers may carry stale bytes past the content.
    for content in [&input.first, &input.second] {
        match buffer.set_bytes(content) {
            Ok(()) => assert_eq!(buffer.as_bytes(), content.as_slice()),
            Err(err) => assert!(content.is_empty(), "unexpected {err}"),
        }
        assert!(buffer.capacity() > buffer.len());
    }

    let (start, end, step) = (
        usize::from(input.start),
        usize::from(input.end),
        isize::from(input.step),
    );
    let content = buffer.as_bytes().to_vec();

    match (buffer.splice(start, end, step), reference_indices(start, end, step)) {
        (Ok(spliced), Some(indices)) => {
            let expected: Vec<u8> = indices.iter().map(|&i| content[i]).collect();
            assert_eq!(spliced.as_bytes(), expected.as_slice());
            assert_eq!(spliced.as_bytes_with_nul()[spliced.len()], 0);
        }
        (Err(BufferError::IndexOutOfRange { index, len }), Some(indices)) => {
            assert!(index >= len);
            assert_eq!(indices.iter().find(|&&i| i >= len), Some(&index));
        }
        (Err(BufferError::InvalidArgument(_)), None) => {}
        (result, expected) => panic!("splice returned {result:?}, reference {expected:?}"),
    }

    assert_eq!(buffer.as_bytes(), content.as_slice());
}

fuzz_target!(|input: Input| check(input));

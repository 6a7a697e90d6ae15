//! Tube stitching.
//!
//! Adjacent rings `(i - 1, i)` are joined by one quad per angular slot `j`:
//!
//! ```text
//! prev + j, prev + (j + 1) % m, cur + (j + 1) % m, cur + j
//! ```
//!
//! The angular index wraps; the ring index does not, so the tube stays open
//! at both ends. With rings built from the `{a, b, c}` frame this winding
//! puts every face normal on the outside of the tube.

/// A quad face as four vertex indices.
pub type Quad = [u32; 4];

/// Pairs of ring base offsets that will be stitched, in ring order.
///
/// A pair is produced only when both neighbouring rings are present.
#[must_use]
pub fn stitch_pairs(ring_offsets: &[Option<u32>]) -> Vec<(u32, u32)> {
    ring_offsets
        .windows(2)
        .filter_map(|w| match (w[0], w[1]) {
            (Some(prev), Some(cur)) => Some((prev, cur)),
            _ => None,
        })
        .collect()
}

/// Write the quads joining ring `prev` to ring `cur` into `out`.
///
/// `out` holds exactly one slot per angular index.
#[inline]
pub fn stitch_pair_into(prev: u32, cur: u32, out: &mut [Quad]) {
    let m = out.len();
    for (j, quad) in out.iter_mut().enumerate() {
        let next = (j + 1) % m;
        // m fits in u32 because the whole vertex buffer does
        #[allow(clippy::cast_possible_truncation)]
        let (j, next) = (j as u32, next as u32);
        *quad = [prev + j, prev + next, cur + next, cur + j];
    }
}

/// Stitch every pair in `pairs` into a pre-sized face buffer.
///
/// `faces` must hold `pairs.len() * profile_resolution` quads.
pub fn stitch_rings_into(faces: &mut [Quad], pairs: &[(u32, u32)], profile_resolution: usize) {
    if profile_resolution == 0 {
        return;
    }
    for (chunk, &(prev, cur)) in faces.chunks_mut(profile_resolution).zip(pairs) {
        stitch_pair_into(prev, cur, chunk);
    }
}

/// Build the quad list for rings starting at `ring_offsets`.
///
/// `ring_offsets[i]` is the index of ring `i`'s first vertex, or `None` when
/// the ring was skipped; faces touching a skipped ring are not emitted.
/// Fewer than two rings yields an empty list.
///
/// # Example
///
/// ```
/// use mesh_spring::stitch_rings;
///
/// // Three rings of four points, laid out after four centerline points
/// let faces = stitch_rings(&[Some(4), Some(8), Some(12)], 4);
///
/// assert_eq!(faces.len(), 8);
/// assert_eq!(faces[0], [4, 5, 9, 8]);
/// assert_eq!(faces[3], [7, 4, 8, 11]);
/// ```
#[must_use]
pub fn stitch_rings(ring_offsets: &[Option<u32>], profile_resolution: usize) -> Vec<Quad> {
    let pairs = stitch_pairs(ring_offsets);
    let mut faces = vec![[0; 4]; pairs.len() * profile_resolution];
    stitch_rings_into(&mut faces, &pairs, profile_resolution);
    faces
}

/// Ring base offsets for `ring_count` contiguous rings starting at `base`.
#[must_use]
pub fn contiguous_offsets(
    base: u32,
    ring_count: usize,
    profile_resolution: usize,
) -> Vec<Option<u32>> {
    (0..ring_count)
        .map(|i| {
            u32::try_from(i * profile_resolution)
                .ok()
                .and_then(|offset| base.checked_add(offset))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_ring_has_no_faces() {
        assert!(stitch_rings(&[Some(0)], 8).is_empty());
        assert!(stitch_rings(&[], 8).is_empty());
    }

    #[test]
    fn face_count_open_tube() {
        let offsets = contiguous_offsets(10, 10, 16);
        let faces = stitch_rings(&offsets, 16);
        assert_eq!(faces.len(), 9 * 16);
    }

    #[test]
    fn adjacent_slots_and_wrap() {
        let h = 6;
        let m = 16;
        let offsets = contiguous_offsets(h, h as usize, m);
        let faces = stitch_rings(&offsets, m);

        let m32 = u32::try_from(m).expect("small");
        for i in 1..h {
            for j in 0..m32 {
                let prev = h + (i - 1) * m32;
                let cur = h + i * m32;
                let next = (j + 1) % m32;
                let face = faces[((i - 1) * m32 + j) as usize];
                assert_eq!(face, [prev + j, prev + next, cur + next, cur + j]);
            }
        }
    }

    #[test]
    fn indices_distinct() {
        let faces = stitch_rings(&contiguous_offsets(0, 5, 3), 3);
        for face in faces {
            for a in 0..4 {
                for b in (a + 1)..4 {
                    assert_ne!(face[a], face[b]);
                }
            }
        }
    }

    #[test]
    fn no_wrap_between_last_and_first_ring() {
        let offsets = contiguous_offsets(0, 4, 4);
        let faces = stitch_rings(&offsets, 4);
        let last_ring = 12;
        assert!(
            faces
                .iter()
                .all(|f| !(f.contains(&0) && f.iter().any(|&v| v >= last_ring)))
        );
    }

    #[test]
    fn skipped_ring_drops_neighbouring_faces() {
        // Ring 1 skipped; rings 0, 2, 3 packed contiguously
        let offsets = [Some(0), None, Some(4), Some(8)];
        let faces = stitch_rings(&offsets, 4);

        assert_eq!(faces.len(), 4);
        assert!(faces.iter().all(|f| f.iter().all(|&v| (4..12).contains(&v))));
    }

    #[test]
    fn pairs_follow_ring_order() {
        let pairs = stitch_pairs(&[Some(0), Some(3), None, Some(6), Some(9)]);
        assert_eq!(pairs, vec![(0, 3), (6, 9)]);
    }

    #[test]
    fn contiguous_offsets_step_by_resolution() {
        assert_eq!(contiguous_offsets(5, 3, 4), vec![Some(5), Some(9), Some(13)]);
    }
}

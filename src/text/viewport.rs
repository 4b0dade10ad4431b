/// First index of the `height`-row window centered on `focus`.
///
/// Odd heights center exactly. Even heights put one more row below the
/// focus line than above it, so scrolling by one line never jitters.
pub fn window_start(len: usize, focus: usize, height: usize) -> usize {
    if height == 0 || height >= len {
        return 0;
    }
    let above = (height - 1) / 2;
    let below = (height - height % 2) / 2;
    if focus <= above {
        0
    } else if focus > len - 1 - below {
        len - height
    } else {
        focus - above
    }
}

/// Which edge rows of the window take a marker: `(top, bottom)`.
///
/// A window pinned to the first lines only gets the bottom marker, one
/// pinned to the last lines only the top marker, a centered window both.
pub fn window_markers(len: usize, focus: usize, height: usize) -> (bool, bool) {
    if height == 0 || height >= len {
        return (false, false);
    }
    let above = (height - 1) / 2;
    let below = (height - height % 2) / 2;
    if focus <= above {
        (false, true)
    } else if focus > len - 1 - below {
        (true, false)
    } else {
        (true, true)
    }
}

/// Clip `lines` to `height` rows centered on `focus`.
///
/// `replace_top` and `replace_bottom` take the place of the first and last
/// row on the sides picked by `window_markers`, e.g. a "more above" marker.
/// Nothing is replaced when everything fits.
pub fn fix_height<T: Clone>(
    lines: &[T],
    focus: usize,
    height: usize,
    replace_top: Option<&T>,
    replace_bottom: Option<&T>,
) -> Vec<T> {
    if height >= lines.len() {
        return lines.to_vec();
    }
    if height == 0 {
        return Vec::new();
    }

    let start = window_start(lines.len(), focus, height);
    let (top_marker, bottom_marker) = window_markers(lines.len(), focus, height);
    let mut window = lines[start..start + height].to_vec();

    if let (true, Some(top)) = (top_marker, replace_top) {
        window[0] = top.clone();
    }
    if let (true, Some(bottom)) = (bottom_marker, replace_bottom) {
        window[height - 1] = bottom.clone();
    }
    window
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eight() -> Vec<usize> {
        (0..8).collect()
    }

    #[test]
    fn test_window_at_top() {
        assert_eq!(fix_height(&eight(), 0, 5, None, None), vec![0, 1, 2, 3, 4]);
        assert_eq!(fix_height(&eight(), 2, 5, None, None), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_window_at_bottom() {
        assert_eq!(fix_height(&eight(), 7, 5, None, None), vec![3, 4, 5, 6, 7]);
        assert_eq!(fix_height(&eight(), 6, 5, None, None), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_window_centered() {
        assert_eq!(fix_height(&eight(), 4, 5, None, None), vec![2, 3, 4, 5, 6]);
        assert_eq!(fix_height(&eight(), 3, 5, None, None), vec![1, 2, 3, 4, 5]);
        assert_eq!(fix_height(&eight(), 5, 5, None, None), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_even_height_puts_extra_row_below() {
        assert_eq!(fix_height(&eight(), 2, 4, None, None), vec![1, 2, 3, 4]);
        assert_eq!(fix_height(&eight(), 5, 4, None, None), vec![4, 5, 6, 7]);
        assert_eq!(fix_height(&eight(), 6, 4, None, None), vec![4, 5, 6, 7]);
    }

    #[test]
    fn test_single_line_steps_never_jump() {
        for height in 1..8 {
            let mut last = 0;
            for focus in 0..8 {
                let start = window_start(8, focus, height);
                assert!(start == last || start == last + 1, "height {height} focus {focus}");
                assert!(focus >= start && focus < start + height);
                last = start;
            }
        }
    }

    #[test]
    fn test_markers_replace_clipped_edges() {
        let top = 100;
        let bottom = 200;
        assert_eq!(
            fix_height(&eight(), 0, 5, Some(&top), Some(&bottom)),
            vec![0, 1, 2, 3, 200]
        );
        assert_eq!(
            fix_height(&eight(), 7, 5, Some(&top), Some(&bottom)),
            vec![100, 4, 5, 6, 7]
        );
        assert_eq!(
            fix_height(&eight(), 4, 5, Some(&top), Some(&bottom)),
            vec![100, 3, 4, 5, 200]
        );
    }

    #[test]
    fn test_centered_window_reaching_last_line_keeps_both_markers() {
        let top = 100;
        let bottom = 200;
        assert_eq!(
            fix_height(&eight(), 5, 5, Some(&top), Some(&bottom)),
            vec![100, 4, 5, 6, 200]
        );
        assert_eq!(window_markers(8, 5, 5), (true, true));
        assert_eq!(window_markers(8, 6, 5), (true, false));
        assert_eq!(window_markers(8, 2, 5), (false, true));
        assert_eq!(window_markers(8, 2, 8), (false, false));
    }

    #[test]
    fn test_everything_fits() {
        let marker = 9;
        assert_eq!(fix_height(&eight(), 3, 8, Some(&marker), Some(&marker)), eight());
        assert_eq!(fix_height(&eight(), 3, 20, None, None), eight());
    }

    #[test]
    fn test_zero_height() {
        assert!(fix_height(&eight(), 3, 0, None, None).is_empty());
        assert_eq!(window_start(8, 3, 0), 0);
    }
}

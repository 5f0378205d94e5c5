/// Returns the index of the largest value, the lowest one on ties.
///
/// Only a strictly greater value replaces the running maximum, so a `NaN` never wins
/// unless it comes first. `None` if there are no values.
pub fn argmax<'a, I>(values: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a f32>,
{
    let mut values = values.into_iter().enumerate();
    let (mut best, mut max) = values.next().map(|(i, &x)| (i, x))?;

    for (i, &x) in values {
        if x > max {
            best = i;
            max = x;
        }
    }

    Some(best)
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn picks_the_maximum() {
        assert_eq!(argmax(&[0.1, 0.3, 0.9, 0.2]), Some(2));
        assert_eq!(argmax(&array![0.1f32, 0.05, 0.0]), Some(0));
    }

    #[test]
    fn ties_go_to_the_lowest_index() {
        let out = [0.5, 0.5, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1];
        assert_eq!(argmax(&out), Some(0));

        assert_eq!(argmax(&[0.2, 0.7, 0.7]), Some(1));
    }

    #[test]
    fn empty_has_no_maximum() {
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn nan_is_never_greater() {
        assert_eq!(argmax(&[0.1, f32::NAN, 0.4]), Some(2));
        assert_eq!(argmax(&[f32::NAN, 0.1, 0.4]), Some(0));
    }
}

/// Limit `length` to at most `limit`.
pub fn cap_length<T>(length: T, limit: T) -> T
where
    T: PartialOrd,
{
    if length < limit {
        length
    } else {
        limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap_length_test() {
        assert_eq!(cap_length(450, 1200), 450);
        assert_eq!(cap_length(1200, 1200), 1200);
        assert_eq!(cap_length(1800, 1200), 1200);
        assert_eq!(cap_length(0.5, 0.25), 0.25);
    }
}

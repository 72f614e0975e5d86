/// Kotlin-style scope function, used to keep long query chains flowing.
pub trait LetAlso: Sized {
    /// Moves `self` into `f` and returns its result.
    fn let_owned<R>(self, f: impl FnOnce(Self) -> R) -> R {
        f(self)
    }
}

impl<T> LetAlso for T {}

#[cfg(test)]
mod tests {
    use super::LetAlso;

    #[test]
    fn let_owned_maps_value() {
        let len = vec![1, 2, 3].let_owned(|values| values.len());
        assert_eq!(len, 3);
    }
}

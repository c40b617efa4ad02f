#[cfg(test)]
pub mod test_utils {
    use serde::{Deserialize, Serialize};
    use serde_json::Value;

    pub fn test_serde<T>(value: T, expected: Value)
    where
        T: for<'de> Deserialize<'de> + Serialize + std::fmt::Debug + PartialEq,
    {
        let deserialized = T::deserialize(&expected).unwrap();
        assert_eq!(value, deserialized);

        let serialized = serde_json::to_value(&value).unwrap();
        assert_eq!(expected, serialized);
    }
}

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, Error, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::{ColMajorLayout, Dims, Extents, LayoutMapping, RowMajorLayout, StridedLayout};

impl<D: Dims> Serialize for Extents<D> {
    fn serialize<Sr>(&self, serializer: Sr) -> Result<Sr::Ok, Sr::Error>
    where
        Sr: Serializer,
    {
        serializer.collect_seq(self.shape())
    }
}

impl<'de, D: Dims> Deserialize<'de> for Extents<D> {
    fn deserialize<De>(deserializer: De) -> Result<Extents<D>, De::Error>
    where
        De: Deserializer<'de>,
    {
        let shape = Vec::<usize>::deserialize(deserializer)?;
        Extents::try_from_shape(&shape).map_err(De::Error::custom)
    }
}

fn serialize_layout<L: LayoutMapping, Sr: Serializer>(
    name: &'static str,
    layout: &L,
    serializer: Sr,
) -> Result<Sr::Ok, Sr::Error> {
    let mut state = serializer.serialize_struct(name, 2)?;
    state.serialize_field("shape", layout.extents().shape().as_ref())?;
    state.serialize_field("strides", layout.strides().as_ref())?;
    state.end()
}

impl<E: Dims, S: Dims<Rank = E::Rank>> Serialize for StridedLayout<E, S> {
    fn serialize<Sr>(&self, serializer: Sr) -> Result<Sr::Ok, Sr::Error>
    where
        Sr: Serializer,
    {
        serialize_layout("StridedLayout", self, serializer)
    }
}

impl<E: Dims> Serialize for RowMajorLayout<E> {
    fn serialize<Sr>(&self, serializer: Sr) -> Result<Sr::Ok, Sr::Error>
    where
        Sr: Serializer,
    {
        serialize_layout("RowMajorLayout", self, serializer)
    }
}

impl<E: Dims> Serialize for ColMajorLayout<E> {
    fn serialize<Sr>(&self, serializer: Sr) -> Result<Sr::Ok, Sr::Error>
    where
        Sr: Serializer,
    {
        serialize_layout("ColMajorLayout", self, serializer)
    }
}

struct StridedLayoutVisitor<E, S> {
    marker: PhantomData<(E, S)>,
}

impl<'de, E: Dims, S: Dims<Rank = E::Rank>> Visitor<'de> for StridedLayoutVisitor<E, S> {
    type Value = StridedLayout<E, S>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a layout with \"shape\" and \"strides\" fields")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut shape: Option<Vec<usize>> = None;
        let mut strides: Option<Vec<usize>> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "shape" => {
                    if shape.is_some() {
                        return Err(A::Error::duplicate_field("shape"));
                    }
                    shape = Some(map.next_value()?);
                }
                "strides" => {
                    if strides.is_some() {
                        return Err(A::Error::duplicate_field("strides"));
                    }
                    strides = Some(map.next_value()?);
                }
                _ => {
                    return Err(A::Error::unknown_field(&key, &["shape", "strides"]));
                }
            }
        }

        let Some(shape) = shape else {
            return Err(A::Error::missing_field("shape"));
        };
        let Some(strides) = strides else {
            return Err(A::Error::missing_field("strides"));
        };

        StridedLayout::try_from_shape_and_strides(&shape, &strides).map_err(A::Error::custom)
    }
}

impl<'de, E: Dims, S: Dims<Rank = E::Rank>> Deserialize<'de> for StridedLayout<E, S> {
    fn deserialize<De>(deserializer: De) -> Result<StridedLayout<E, S>, De::Error>
    where
        De: Deserializer<'de>,
    {
        deserializer.deserialize_struct(
            "StridedLayout",
            &["shape", "strides"],
            StridedLayoutVisitor {
                marker: PhantomData,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::{Dynamic, Extents, LayoutMapping, RowMajorLayout, Static, StridedLayout};

    type Layout = StridedLayout<(Dynamic, Static<4>), (Dynamic, Static<1>)>;

    #[test]
    fn test_deserialize_serialize_strided_layout() {
        struct Case<'a> {
            json: &'a str,
            expected: Result<([usize; 2], [usize; 2]), String>,
        }

        let cases = [
            Case {
                json: r#"{"shape": [3, 4], "strides": [6, 1]}"#,
                expected: Ok(([3, 4], [6, 1])),
            },
            Case {
                json: "[]",
                expected: Err(
                    "expected a layout with \"shape\" and \"strides\" fields".to_string(),
                ),
            },
            Case {
                json: r#"{"shape": [3, 4]}"#,
                expected: Err("missing field `strides`".to_string()),
            },
            Case {
                json: r#"{"shape": [3, 4], "shape": [3, 4]}"#,
                expected: Err("duplicate field `shape`".to_string()),
            },
            Case {
                json: r#"{"shape": [3, 4, 5], "strides": [6, 1]}"#,
                expected: Err("expected 2 dims but got 3".to_string()),
            },
            Case {
                json: r#"{"shape": [3, 5], "strides": [6, 1]}"#,
                expected: Err("extent 5 of dim 1 does not match static extent 4".to_string()),
            },
            Case {
                json: r#"{"shape": [3, 4], "strides": [1, 3]}"#,
                expected: Err("stride 3 of dim 1 does not match static stride 1".to_string()),
            },
        ];

        for Case { json, expected } in cases {
            let actual: Result<Layout, String> =
                serde_json::from_str(json).map_err(|e| e.to_string());

            match (actual, expected) {
                (Ok(layout), Ok((shape, strides))) => {
                    assert_eq!(layout.extents().shape(), shape);
                    assert_eq!(layout.strides(), strides);

                    let actual_json = serde_json::to_value(layout).unwrap();
                    let expected_json: serde_json::Value = serde_json::from_str(json).unwrap();
                    assert_eq!(actual_json, expected_json);
                }
                (Err(actual_err), Err(expected_err)) => assert!(
                    actual_err.contains(&expected_err),
                    "expected \"{}\" to contain \"{}\"",
                    actual_err,
                    expected_err
                ),
                (actual, expected) => panic!(
                    "expected {:?} but got {:?}",
                    expected,
                    actual.map(|l| l.strides())
                ),
            }
        }
    }

    #[test]
    fn test_serialize_dense_layout() {
        let layout = RowMajorLayout::new(Extents::<(Dynamic, Dynamic)>::new([2, 3]));
        let json = serde_json::to_value(layout).unwrap();
        assert_eq!(json, serde_json::json!({"shape": [2, 3], "strides": [3, 1]}));
    }

    #[test]
    fn test_deserialize_extents() {
        let extents: Extents<(Static<2>, Dynamic)> = serde_json::from_str("[2, 7]").unwrap();
        assert_eq!(extents.shape(), [2, 7]);
        assert_eq!(serde_json::to_string(&extents).unwrap(), "[2,7]");

        let err = serde_json::from_str::<Extents<(Static<2>, Dynamic)>>("[3, 7]").unwrap_err();
        assert!(err
            .to_string()
            .contains("extent 3 of dim 0 does not match static extent 2"));
    }
}

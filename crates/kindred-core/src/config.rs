use serde_json::{Map, Value, json};

/// JSON-backed configuration for the layout passes.
///
/// Holds an arbitrary JSON object addressed with dotted paths, so
/// page-supplied overrides can be merged in without a typed schema. Readers
/// fall back to their own defaults when a path is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeConfig(Value);

impl Default for TreeConfig {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl TreeConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Built-in defaults: the 500x500 viewport, the person navigation URL
    /// template and the row box metrics.
    pub fn defaults() -> Self {
        Self(json!({
            "viewport": {
                "width": 500,
                "height": 500
            },
            "navigation": {
                "personUrl": "/person/{id}/graph/"
            },
            "rows": {
                "boxWidth": 100,
                "boxHeight": 40,
                "horizontalPadding": 20,
                "verticalPadding": 60
            }
        }))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn as_value_mut(&mut self) -> &mut Value {
        &mut self.0
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        cur.as_str()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        cur.as_f64()
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        // Callers can construct `TreeConfig` from any JSON value via
        // `from_value`; a non-object root is coerced to an object here so this
        // API never panics on user input.
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

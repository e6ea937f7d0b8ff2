use super::*;

impl NdfDocument {
    /// Find a node by dot-separated key path. At every level the first
    /// layer containing the key wins. An empty path is the root.
    pub fn node(&self, path: &str) -> Result<&Node, NdfError> {
        if path.trim().is_empty() {
            return Ok(&self.root);
        }

        path.split('.')
            .try_fold(&self.root, |node, segment| node.get(segment))
            .ok_or_else(|| path_not_found(path))
    }

    /// Get a typed value from the document using dot notation.
    ///
    /// # Examples
    /// ```
    /// # use ndf_cfg::NdfDocument;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let doc = NdfDocument::from_str("Server{Host:localhost;Port:8080;}")?;
    /// let host: String = doc.get("Server.Host")?;
    /// let port: u16 = doc.get("Server.Port")?;
    /// assert_eq!((host.as_str(), port), ("localhost", 8080));
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// Returns error if path doesn't exist or the node can't be converted to type T.
    pub fn get<T>(&self, path: &str) -> Result<T, NdfError>
    where
        T: for<'n> TryFrom<&'n Node, Error = NdfError>,
    {
        let node = self.node(path)?;
        T::try_from(node).map_err(|e| with_path(e, path))
    }

    /// Like `get`, but a missing path is `Ok(None)`.
    pub fn get_optional<T>(&self, path: &str) -> Result<Option<T>, NdfError>
    where
        T: for<'n> TryFrom<&'n Node, Error = NdfError>,
    {
        match self.get(path) {
            Ok(value) => Ok(Some(value)),
            Err(NdfError::PathNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get a value with a fallback default.
    pub fn get_or<T>(&self, path: &str, default: T) -> T
    where
        T: for<'n> TryFrom<&'n Node, Error = NdfError>,
    {
        self.get(path).unwrap_or(default)
    }

    /// Every node named by the last segment of `path`, across all layers of
    /// its parent. This is how repeated keys are read back.
    ///
    /// ```
    /// # use ndf_cfg::NdfDocument;
    /// let doc = NdfDocument::from_str("Drop:Gold;Drop:Gem;").unwrap();
    /// let drops: Vec<String> = doc.get_all("Drop").unwrap();
    /// assert_eq!(drops, vec!["Gold", "Gem"]);
    /// ```
    pub fn get_all<T>(&self, path: &str) -> Result<Vec<T>, NdfError>
    where
        T: for<'n> TryFrom<&'n Node, Error = NdfError>,
    {
        let (parent, key) = match path.rsplit_once('.') {
            Some((parent, key)) => (self.node(parent)?, key),
            None => (&self.root, path),
        };

        parent
            .get_all(key)
            .map(|node| T::try_from(node).map_err(|e| with_path(e, path)))
            .collect()
    }

    pub fn has(&self, path: &str) -> bool {
        self.node(path).is_ok()
    }

    /// Child keys at `path`, in first-seen order across layers, without repeats.
    pub fn keys(&self, path: &str) -> Result<Vec<String>, NdfError> {
        let node = self.node(path)?;
        let mut keys: Vec<String> = Vec::new();
        for key in node.layers().iter().flat_map(Layer::keys) {
            if !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
        }
        Ok(keys)
    }

    /// Set the value at `path`, which must already exist.
    pub fn set_value(&mut self, path: &str, value: Option<String>) -> Result<(), NdfError> {
        let mut node = &mut self.root;
        if !path.trim().is_empty() {
            for segment in path.split('.') {
                node = node.get_mut(segment).ok_or_else(|| path_not_found(path))?;
            }
        }
        node.set_value(value);
        Ok(())
    }
}

fn path_not_found(path: &str) -> NdfError {
    NdfError::PathNotFound {
        path: path.to_string(),
        hint: Some("Check that every key along the path exists in the document".into()),
        code: Some(401),
    }
}

fn with_path(e: NdfError, path: &str) -> NdfError {
    match e {
        NdfError::TypeError { message, hint, code, .. } => NdfError::TypeError {
            message,
            path: path.to_string(),
            hint,
            code,
        },
        other => other,
    }
}

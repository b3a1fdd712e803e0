/// Query parameters the authorization server appends when redirecting back.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct CallbackParams {
    pub code: Option<String>,
    pub error_description: Option<String>,
}

impl CallbackParams {
    /// Collects the parameters from decoded query pairs. A repeated key keeps its last
    /// value and unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        pairs
            .into_iter()
            .fold(Self::default(), |mut params, (key, value)| {
                match key.as_str() {
                    "code" => params.code = Some(value),
                    "error_description" => params.error_description = Some(value),
                    _ => {}
                }
                params
            })
    }
}

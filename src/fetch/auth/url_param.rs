use crate::fetch::client::HttpClient;
use async_trait::async_trait;

/// Query parameter name the DMI API expects its key in.
const API_KEY_PARAM: &str = "api-key";

/// An [`HttpClient`] wrapper that appends a secret as a URL query parameter.
///
/// The wrapped request URL is built and logged without the secret; the
/// parameter is only added right before the request leaves.
pub struct UrlParam<C> {
    pub inner: C,
    pub param_name: String,
    pub key: String,
}

impl<C> UrlParam<C> {
    /// Sends `key` as the `api-key` query parameter.
    pub fn api_key(inner: C, key: String) -> Self {
        Self {
            inner,
            param_name: API_KEY_PARAM.to_string(),
            key,
        }
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for UrlParam<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.url_mut()
            .query_pairs_mut()
            .append_pair(&self.param_name, &self.key);
        self.inner.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder(Mutex<Vec<reqwest::Url>>);

    #[async_trait]
    impl HttpClient for Recorder {
        async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            self.0.lock().unwrap().push(req.url().clone());
            Ok(http::Response::new("{}").into())
        }
    }

    #[tokio::test]
    async fn test_api_key_appended_last() {
        let recorder = Recorder(Mutex::new(Vec::new()));
        let client = UrlParam::api_key(&recorder, "s3cret".to_string());

        let url = "https://example.org/items?municipalityId=0751".parse().unwrap();
        client
            .execute(reqwest::Request::new(reqwest::Method::GET, url))
            .await
            .unwrap();

        let seen = recorder.0.lock().unwrap();
        let pairs: Vec<(String, String)> = seen[0].query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("municipalityId".to_string(), "0751".to_string()),
                ("api-key".to_string(), "s3cret".to_string()),
            ]
        );
    }
}

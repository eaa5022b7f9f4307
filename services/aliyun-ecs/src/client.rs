//! Thin typed client for the ECS RPC operations the tool uses.

use std::collections::HashMap;

use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use ecsctl_core::{Error, Result};

use crate::constants::{ENDPOINT, PARAM_REGION_ID};
use crate::credential::Credential;
use crate::region::Region;
use crate::sign::RequestSigner;

/// One OS image, as returned by `DescribeImages`.
#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    /// Image identifier, e.g. `ubuntu_22_04_x64_20G_alibase_20240101.vhd`.
    #[serde(rename = "ImageId")]
    pub image_id: String,
    /// Display name of the image.
    #[serde(rename = "ImageName", default)]
    pub image_name: String,
    /// Operating system name; the API omits it for some custom images.
    #[serde(rename = "OSName", default)]
    pub os_name: Option<String>,
}

/// One virtual machine instance, as returned by `DescribeInstances`.
#[derive(Debug, Clone, Deserialize)]
pub struct Instance {
    /// Instance identifier, e.g. `i-abc123`.
    #[serde(rename = "InstanceId")]
    pub instance_id: String,
    /// Operator-assigned display name.
    #[serde(rename = "InstanceName", default)]
    pub instance_name: String,
    /// Lifecycle status, e.g. `Running` or `Stopped`.
    #[serde(rename = "Status", default)]
    pub status: String,
}

/// Client for the ECS compute API, bound to one credential and region.
///
/// All calls are signed GETs issued one at a time; there is no retry and no
/// caching. Action-specific response bodies are passed through as JSON
/// unless the operation has a typed payload the menus need.
#[derive(Debug)]
pub struct EcsClient {
    http: reqwest::blocking::Client,
    signer: RequestSigner,
    credential: Credential,
    region: Region,
}

impl EcsClient {
    /// Create a client for one account.
    pub fn new(credential: Credential, region: Region) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| Error::unexpected("failed to build HTTP client").with_source(e))?;
        Ok(Self {
            http,
            signer: RequestSigner::new(),
            credential,
            region,
        })
    }

    /// The region this client talks to.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Issue one signed RPC call and return the raw JSON body.
    fn invoke(&self, action: &str, mut params: HashMap<String, String>) -> Result<Value> {
        params.insert(PARAM_REGION_ID.to_string(), self.region.as_str().to_string());
        let query = self.signer.signed_query(action, &params, &self.credential)?;

        let url = format!("{ENDPOINT}?{query}");
        debug!("{action}: GET {ENDPOINT}");

        let resp = self
            .http
            .get(url)
            .send()
            .map_err(|e| Error::unexpected(format!("{action} request failed")).with_source(e))?;
        let status = resp.status();
        let body: Value = resp
            .json()
            .map_err(|e| Error::unexpected(format!("{action} returned malformed JSON")).with_source(e))?;

        if !status.is_success() {
            let code = body.get("Code").and_then(Value::as_str).unwrap_or("unknown");
            let message = body.get("Message").and_then(Value::as_str).unwrap_or("");
            return Err(Error::unexpected(format!(
                "{action} failed with {status}: {code}: {message}"
            )));
        }
        Ok(body)
    }

    /// List available OS images in the client's region.
    pub fn describe_images(&self) -> Result<Vec<Image>> {
        let params = HashMap::from([("PageSize".to_string(), "100".to_string())]);
        let body = self.invoke("DescribeImages", params)?;
        unwrap_list(&body, "Images", "Image")
    }

    /// List instances in the client's region.
    pub fn describe_instances(&self) -> Result<Vec<Instance>> {
        let body = self.invoke("DescribeInstances", HashMap::new())?;
        unwrap_list(&body, "Instances", "Instance")
    }

    /// Rebuild an instance from an image, setting its login password.
    pub fn replace_system_disk(
        &self,
        instance_id: &str,
        image_id: &str,
        password: &str,
    ) -> Result<Value> {
        let params = HashMap::from([
            ("InstanceId".to_string(), instance_id.to_string()),
            ("ImageId".to_string(), image_id.to_string()),
            ("Password".to_string(), password.to_string()),
        ]);
        self.invoke("ReplaceSystemDisk", params)
    }

    /// Reset an instance's password and enable password authentication.
    pub fn modify_instance_attribute(&self, instance_id: &str, password: &str) -> Result<Value> {
        let params = HashMap::from([
            ("InstanceId".to_string(), instance_id.to_string()),
            ("Password".to_string(), password.to_string()),
            ("PasswordAuthentication".to_string(), "true".to_string()),
        ]);
        self.invoke("ModifyInstanceAttribute", params)
    }

    /// Reboot an instance.
    pub fn reboot_instance(&self, instance_id: &str) -> Result<Value> {
        let params = HashMap::from([("InstanceId".to_string(), instance_id.to_string())]);
        self.invoke("RebootInstance", params)
    }
}

/// Unwrap the API's doubly-nested list shape, e.g. `Images.Image`.
///
/// A missing list means an empty result, not an error.
fn unwrap_list<T: DeserializeOwned>(body: &Value, outer: &str, inner: &str) -> Result<Vec<T>> {
    match body.pointer(&format!("/{outer}/{inner}")) {
        Some(list) => serde_json::from_value(list.clone())
            .map_err(|e| Error::unexpected(format!("malformed {outer}.{inner} payload")).with_source(e)),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_unwrap_images() {
        let body = json!({
            "RequestId": "473469C7-AA6F-4DC5-B3DB-A3DC0DE3C83E",
            "PageSize": 100,
            "Images": {
                "Image": [
                    {
                        "ImageId": "ubuntu_22_04_x64_20G_alibase_20240101.vhd",
                        "ImageName": "ubuntu_22_04",
                        "OSName": "Ubuntu 22.04 64-bit"
                    },
                    {
                        "ImageId": "m-custom123",
                        "ImageName": "my-snapshot"
                    }
                ]
            }
        });

        let images: Vec<Image> = unwrap_list(&body, "Images", "Image").unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].os_name.as_deref(), Some("Ubuntu 22.04 64-bit"));
        assert_eq!(images[1].image_id, "m-custom123");
        assert_eq!(images[1].os_name, None);
    }

    #[test]
    fn test_unwrap_instances() {
        let body = json!({
            "Instances": {
                "Instance": [
                    {
                        "InstanceId": "i-abc123",
                        "InstanceName": "web-1",
                        "Status": "Running"
                    }
                ]
            }
        });

        let instances: Vec<Instance> = unwrap_list(&body, "Instances", "Instance").unwrap();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].instance_id, "i-abc123");
        assert_eq!(instances[0].status, "Running");
    }

    #[test]
    fn test_unwrap_missing_list_is_empty() {
        let body = json!({ "RequestId": "x" });
        let images: Vec<Image> = unwrap_list(&body, "Images", "Image").unwrap();
        assert!(images.is_empty());
    }

    #[test]
    fn test_unwrap_malformed_list() {
        let body = json!({ "Images": { "Image": [{ "NotAnImage": true }] } });
        let err = unwrap_list::<Image>(&body, "Images", "Image").unwrap_err();
        assert_eq!(err.kind(), ecsctl_core::ErrorKind::Unexpected);
    }
}

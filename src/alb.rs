use serde::Serialize;

use crate::outputs::{fetch_outputs, OutputSource, RawOutputs};

/// Load balancer details in the shape the Ansible playbooks expect.
///
/// Field order is the serialized key order. Missing outputs are left out of the
/// document entirely rather than written as `null`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct AlbInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alb_dns_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alb_arn: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub https_listener_arn: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nginx_target_group_arn: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub springboot_target_group_arn: Option<String>,
}

impl AlbInfo {
    pub fn from_outputs(outputs: &RawOutputs) -> Self {
        let lookup = |key: &str| outputs.get(key).cloned();

        Self {
            alb_dns_name: lookup("ALBDNSName"),
            alb_arn: lookup("ALBArn"),
            https_listener_arn: lookup("HTTPSListenerArn"),
            nginx_target_group_arn: lookup("NginxTargetGroupArn"),
            springboot_target_group_arn: lookup("SpringBootTargetGroupArn"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

pub async fn build_alb_info(source: &dyn OutputSource) -> AlbInfo {
    let outputs = fetch_outputs(source).await;
    AlbInfo::from_outputs(&outputs)
}

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cloudformation::operation::describe_stacks::DescribeStacksError;
use aws_sdk_cloudformation::types::Output;
use aws_types::region::Region;
use tracing::{debug, error};

use crate::config::StackQuery;

/// Output key to output value, exactly as declared by the stack.
pub type RawOutputs = HashMap<String, String>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Service error ocurred: {0}.")]
    ServiceError(String),

    #[error("Unknown error ocurred: {0}.")]
    UnknownError(String),

    #[error("Stack {0} not found")]
    NotFoundError(String),

    #[error("Stack {0} returned an output without a key or value")]
    MalformedOutput(String),
}

/// Anything that can produce the declared outputs of a single stack.
#[async_trait]
pub trait OutputSource: Send + Sync {
    fn stack_name(&self) -> &str;

    async fn get_outputs(&self) -> Result<RawOutputs, Error>;
}

pub struct Stack {
    pub stack_name: String,

    client: aws_sdk_cloudformation::Client,
}

impl Stack {
    pub async fn new(query: &StackQuery) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(query.region.clone()));
        if let Some(endpoint_url) = &query.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        let sdk_config = loader.load().await;
        let client = aws_sdk_cloudformation::Client::new(&sdk_config);

        return Self {
            stack_name: query.stack_name.clone(),
            client,
        };
    }
}

#[async_trait]
impl OutputSource for Stack {
    fn stack_name(&self) -> &str {
        &self.stack_name
    }

    async fn get_outputs(&self) -> Result<RawOutputs, Error> {
        debug!(stack = %self.stack_name, "describing stack");
        let result = self
            .client
            .describe_stacks()
            .stack_name(&self.stack_name)
            .send()
            .await;

        let result = match result {
            Ok(data) => data,
            Err(SdkError::ServiceError(service_error)) => {
                return Err(service_error_from(service_error.err()));
            }
            Err(err) => return Err(Error::UnknownError(DisplayErrorContext(err).to_string())),
        };

        let stack = match result.stacks().first() {
            Some(stack) => stack,
            None => return Err(Error::NotFoundError(self.stack_name.clone())),
        };

        return collect_outputs(&self.stack_name, stack.outputs());
    }
}

/// CloudFormation reports every DescribeStacks failure as an unmodeled error, so the
/// provider's code and message live in the error metadata rather than in `Display`.
fn service_error_from(err: &DescribeStacksError) -> Error {
    let description = match (err.code(), err.message()) {
        (Some(code), Some(message)) => format!("{}: {}", code, message),
        (None, Some(message)) => message.to_string(),
        _ => err.to_string(),
    };

    return Error::ServiceError(description);
}

fn collect_outputs(stack_name: &str, outputs: &[Output]) -> Result<RawOutputs, Error> {
    outputs
        .iter()
        .map(|output| match (output.output_key(), output.output_value()) {
            (Some(key), Some(value)) => Ok((key.to_string(), value.to_string())),
            _ => Err(Error::MalformedOutput(stack_name.to_string())),
        })
        .collect()
}

/// Best effort: a failure of any kind is reported on stderr and becomes an empty map.
pub async fn fetch_outputs(source: &dyn OutputSource) -> RawOutputs {
    match source.get_outputs().await {
        Ok(outputs) => {
            debug!(stack = source.stack_name(), count = outputs.len(), "fetched outputs");
            outputs
        }
        Err(err) => {
            error!(
                stack = source.stack_name(),
                "Error getting CloudFormation outputs: {}", err
            );
            RawOutputs::new()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use async_trait::async_trait;
    use aws_sdk_cloudformation::error::ErrorMetadata;
    use aws_sdk_cloudformation::operation::describe_stacks::DescribeStacksError;
    use aws_sdk_cloudformation::types::Output;

    use super::{
        collect_outputs, fetch_outputs, service_error_from, Error, OutputSource, RawOutputs,
    };

    pub struct FakeSource {
        pub result: Result<RawOutputs, Error>,
    }

    impl FakeSource {
        pub fn with_outputs(pairs: &[(&str, &str)]) -> Self {
            let outputs = pairs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect();
            Self { result: Ok(outputs) }
        }

        pub fn failing(error: Error) -> Self {
            Self { result: Err(error) }
        }
    }

    #[async_trait]
    impl OutputSource for FakeSource {
        fn stack_name(&self) -> &str {
            "fake-stack"
        }

        async fn get_outputs(&self) -> Result<RawOutputs, Error> {
            self.result.clone()
        }
    }

    fn output(key: Option<&str>, value: Option<&str>) -> Output {
        Output::builder()
            .set_output_key(key.map(String::from))
            .set_output_value(value.map(String::from))
            .build()
    }

    #[test]
    fn collects_declared_outputs() {
        let outputs = vec![
            output(Some("ALBArn"), Some("arn:aws:elasticloadbalancing:alb")),
            output(Some("VpcId"), Some("vpc-123")),
        ];

        let collected = collect_outputs("stack", &outputs).unwrap();
        assert_eq!(2, collected.len());
        assert_eq!("vpc-123", collected["VpcId"]);
    }

    #[test]
    fn no_outputs_is_empty() {
        let collected = collect_outputs("stack", &[]).unwrap();
        assert_eq!(true, collected.is_empty());
    }

    #[test]
    fn output_without_value_is_malformed() {
        let outputs = vec![output(Some("ALBArn"), None)];

        let result = collect_outputs("stack", &outputs);
        assert_eq!(Err(Error::MalformedOutput(String::from("stack"))), result);
    }

    #[test]
    fn service_error_keeps_provider_message() {
        let err = DescribeStacksError::generic(
            ErrorMetadata::builder()
                .code("ValidationError")
                .message("Stack with id hashi-kerberos-test does not exist")
                .build(),
        );

        let mapped = service_error_from(&err);
        assert_eq!(
            Error::ServiceError(String::from(
                "ValidationError: Stack with id hashi-kerberos-test does not exist"
            )),
            mapped
        );
        assert_eq!(true, mapped.to_string().contains("does not exist"));
    }

    #[test]
    fn service_error_without_message_keeps_code() {
        let err = DescribeStacksError::generic(ErrorMetadata::builder().code("AccessDenied").build());

        match service_error_from(&err) {
            Error::ServiceError(description) => {
                assert_eq!(true, description.contains("AccessDenied"))
            }
            other => panic!("Expected `ServiceError` error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn fetch_passes_outputs_through() {
        let source = FakeSource::with_outputs(&[("ALBDNSName", "alb.example.com")]);

        let outputs = fetch_outputs(&source).await;
        assert_eq!("alb.example.com", outputs["ALBDNSName"]);
    }

    #[tokio::test]
    async fn fetch_failure_degrades_to_empty() {
        let source = FakeSource::failing(Error::ServiceError(String::from(
            "Stack with id fake-stack does not exist",
        )));

        let outputs = fetch_outputs(&source).await;
        assert_eq!(true, outputs.is_empty());
    }
}

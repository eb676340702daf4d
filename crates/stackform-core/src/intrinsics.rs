//! Intrinsic references resolved by the provisioning backend at deploy
//! time: `Ref`, `Fn::GetAtt`, and `Fn::Join`.

use serde_json::{json, Value};

/// Pseudo parameter for the deployment region.
pub const REGION: &str = "AWS::Region";

/// Pseudo parameter for the partition URL suffix.
pub const URL_SUFFIX: &str = "AWS::URLSuffix";

/// `{"Ref": logical_id}`
pub fn reference(logical_id: &str) -> Value {
    json!({ "Ref": logical_id })
}

/// `{"Fn::GetAtt": [logical_id, attribute]}`
pub fn get_att(logical_id: &str, attribute: &str) -> Value {
    json!({ "Fn::GetAtt": [logical_id, attribute] })
}

/// `{"Fn::Join": [separator, parts]}`
pub fn join(separator: &str, parts: Vec<Value>) -> Value {
    json!({ "Fn::Join": [separator, parts] })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_shape() {
        assert_eq!(
            reference("ApiGatewayRestApi"),
            json!({ "Ref": "ApiGatewayRestApi" })
        );
    }

    #[test]
    fn test_get_att_shape() {
        assert_eq!(
            get_att("ApiGatewayLogGroup", "Arn"),
            json!({ "Fn::GetAtt": ["ApiGatewayLogGroup", "Arn"] })
        );
    }

    #[test]
    fn test_join_shape() {
        assert_eq!(
            join("-", vec![json!("a"), reference(REGION)]),
            json!({ "Fn::Join": ["-", ["a", { "Ref": "AWS::Region" }]] })
        );
    }
}

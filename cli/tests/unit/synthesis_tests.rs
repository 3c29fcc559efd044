//! End-to-end synthesis of the web server stack through the library API.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use serde_json::{Value, json};

use webhost_cli::application::services::web_stack::{build_web_stack, summarize};
use webhost_cli::domain::TemplateFormat;

use crate::helpers::{FixedScript, MissingScript, SCRIPT, settings};

fn template_json(identifier: &str) -> Value {
    let web = build_web_stack(&settings(identifier), FixedScript(SCRIPT)).expect("build");
    let rendered = web.synthesize().render(TemplateFormat::Json).expect("render");
    serde_json::from_str(&rendered).expect("valid json")
}

fn only_resource<'a>(template: &'a Value, kind: &str) -> &'a Value {
    let matches: Vec<&Value> = template["Resources"]
        .as_object()
        .expect("resources")
        .values()
        .filter(|r| r["Type"] == kind)
        .collect();
    assert_eq!(matches.len(), 1, "expected one {kind}");
    matches[0]
}

#[test]
fn test_synthesis_is_byte_identical_across_runs() {
    let render = || {
        build_web_stack(&settings("Dev"), FixedScript(SCRIPT))
            .expect("build")
            .synthesize()
            .render(TemplateFormat::Json)
            .expect("render")
    };
    assert_eq!(render(), render());
}

#[test]
fn test_synthesis_role_has_managed_policies() {
    let template = template_json("Dev");
    let role = only_resource(&template, "AWS::IAM::Role");
    assert_eq!(
        role["Properties"]["AssumeRolePolicyDocument"]["Statement"][0]["Principal"]["Service"],
        "ec2.amazonaws.com"
    );
    let arns = role["Properties"]["ManagedPolicyArns"].as_array().expect("arns");
    assert_eq!(arns.len(), 2);
    assert_eq!(
        arns[1]["Fn::Join"][1][2],
        ":iam::aws:policy/service-role/AmazonEC2RoleforAWSCodeDeploy"
    );
}

#[test]
fn test_synthesis_security_group_rules() {
    let template = template_json("Dev");
    let group = only_resource(&template, "AWS::EC2::SecurityGroup");
    let ingress = group["Properties"]["SecurityGroupIngress"]
        .as_array()
        .expect("ingress");
    let ports: Vec<i64> = ingress
        .iter()
        .map(|r| r["FromPort"].as_i64().expect("port"))
        .collect();
    assert_eq!(ports, [80, 443, 22]);
    assert!(ingress.iter().all(|r| r["CidrIp"] == "0.0.0.0/0"));
    assert_eq!(
        group["Properties"]["SecurityGroupEgress"],
        json!([{
            "CidrIp": "0.0.0.0/0",
            "Description": "Allow all outbound traffic by default",
            "IpProtocol": "-1",
        }])
    );
    assert_eq!(group["Properties"]["VpcId"], "vpc-1a2b3c4d");
}

#[test]
fn test_synthesis_instance_properties() {
    let template = template_json("Prod-East");
    let instance = only_resource(&template, "AWS::EC2::Instance");
    let props = &instance["Properties"];
    assert_eq!(props["InstanceType"], "t2.micro");
    assert_eq!(props["KeyName"], "web-key");
    assert_eq!(props["SubnetId"], "subnet-22222222");
    assert_eq!(props["AvailabilityZone"], "us-east-1b");
    assert_eq!(
        props["Tags"],
        json!([
            { "Key": "application-name", "Value": "Prod-East-App" },
            { "Key": "stage", "Value": "Prod-East" },
        ])
    );
    let user_data = props["UserData"]["Fn::Base64"].as_str().expect("user data");
    assert_eq!(user_data, format!("#!/bin/bash\n{SCRIPT}"));

    let image_param = props["ImageId"]["Ref"].as_str().expect("image ref");
    assert_eq!(
        template["Parameters"][image_param]["Default"],
        "/aws/service/ami-amazon-linux-latest/amzn2-ami-hvm-x86_64-gp2"
    );
    let profile = props["IamInstanceProfile"]["Ref"].as_str().expect("profile ref");
    assert_eq!(template["Resources"][profile]["Type"], "AWS::IAM::InstanceProfile");
}

#[test]
fn test_synthesis_outputs_reference_instance() {
    let template = template_json("Dev");
    let outputs = template["Outputs"].as_object().expect("outputs");
    assert_eq!(outputs.len(), 2);
    assert!(outputs["InstanceId"]["Value"]["Ref"].is_string());
    assert_eq!(outputs["PublicIp"]["Value"]["Fn::GetAtt"][1], "PublicIp");
}

#[test]
fn test_synthesis_yaml_matches_json_structure() {
    let web = build_web_stack(&settings("Dev"), FixedScript(SCRIPT)).expect("build");
    let yaml = web.synthesize().render(TemplateFormat::Yaml).expect("yaml");
    let from_yaml: Value = serde_yaml::from_str(&yaml).expect("valid yaml");
    assert_eq!(from_yaml, template_json("Dev"));
}

#[test]
fn test_build_web_stack_missing_script_fails() {
    let err = build_web_stack(&settings("Dev"), MissingScript).unwrap_err();
    assert!(format!("{err:#}").contains("configure_server.sh"), "got: {err:#}");
}

#[test]
fn test_summarize_counts() {
    let web = build_web_stack(&settings("Dev"), FixedScript(SCRIPT)).expect("build");
    let template = web.synthesize();
    let summary = summarize(&web, &template).expect("summary");
    assert_eq!(summary.instance_type, "t2.micro");
    assert_eq!(summary.ingress_ports, vec![80, 443, 22]);
    assert_eq!(summary.resources, 4);
    assert_eq!(summary.parameters, 1);
    assert_eq!(summary.outputs, 2);
}

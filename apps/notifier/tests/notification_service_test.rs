//! 通知サービスの結合テスト
//!
//! モックの台帳と発行先を使い、イベント受信から発行までの流れを検証する。
//! 発行されたペイロードは JSON として期待値と比較する。

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use tagguard_domain::account::{AccountId, AccountRecord};
use tagguard_infra::mock::{MockAccountRepository, MockNotificationPublisher};
use tagguard_notifier::{
    error::NotifierError,
    usecase::{NotificationBuilder, NotificationService, TemplateRenderer},
};

const DEFAULT_RECIPIENT: &str = "http://test.slack.test/infra";
const ACCOUNT_CHANNELS: [&str; 3] = [
    "http://test.slack.test/1231231",
    "http://test.slack.test/2354234",
    "http://test.slack.test/4234543",
];

fn make_account() -> AccountRecord {
    AccountRecord::new(
        AccountId::new("012345678921").unwrap(),
        "test-sandbox",
        ACCOUNT_CHANNELS.iter().map(|c| c.to_string()).collect(),
    )
}

fn make_service(
    repo: MockAccountRepository,
    publisher: MockNotificationPublisher,
) -> NotificationService {
    let builder = NotificationBuilder::new(DEFAULT_RECIPIENT, TemplateRenderer::new().unwrap());
    NotificationService::new(Arc::new(repo), Arc::new(publisher), builder)
}

fn make_compliance_event(account_type: &str, next_state: &str) -> Value {
    json!({
        "accountId": "012345678921",
        "resourceId": "test-resource-id",
        "resourceType": "AWS::S3::TestResourceType",
        "region": "eu-west-1",
        "notificationCreationTime": "2019-07-29T09:58:39.751Z",
        "compliance": {
            "compliant": "false",
            "next_state": next_state,
            "accountType": account_type
        }
    })
}

fn expected_notification(text: &str, recipients: &[&str]) -> Value {
    json!({
        "type": "slack",
        "recipients": recipients,
        "payload": {
            "text": text,
            "attachments": [{
                "color": "danger",
                "fields": [
                    {"title": "AWS Account test-sandbox", "value": "Account Id: 012345678921", "short": false},
                    {"title": "Resource Type", "value": "AWS::S3::TestResourceType", "short": false},
                    {"title": "Resource Id", "value": "test-resource-id", "short": false},
                    {"title": "NON-COMPLIANT Reason", "value": "Required Tags are not present", "short": false}
                ],
                "attachment_type": "default"
            }]
        }
    })
}

fn all_recipients() -> Vec<&'static str> {
    let mut recipients = vec![DEFAULT_RECIPIENT];
    recipients.extend(ACCOUNT_CHANNELS);
    recipients
}

/// 発行された唯一のペイロードを JSON として取り出す
fn single_published(publisher: &MockNotificationPublisher) -> Value {
    let published = publisher.published();
    assert_eq!(published.len(), 1, "発行は 1 回だけ");
    serde_json::from_str(&published[0].to_json().unwrap()).unwrap()
}

#[rstest]
#[case::first(
    "sandbox",
    "first_notification",
    "*A non-compliant resource has been created in your AWS Account* on 2019-07-29 09:58:39.751000. \n \
     *If no actions are taken, the resource will be DELETED on 2019-08-12 09:58:39.751000*"
)]
#[case::second(
    "sandbox",
    "second_notification",
    "*This notification is a reminder of a non-compliant resource created in your AWS Account* \n\
     We advise you to take actions before it is DELETED on 2019-08-12 09:58:39.751000*"
)]
#[case::third(
    "sandbox",
    "third_notification",
    "*This notification is a reminder of a non-compliant resource created in your AWS Account* \n \
     *If no actions are taken, the resource will be DELETED on 2019-08-12 09:58:39.751000*"
)]
#[case::production(
    "prod",
    "third_notification",
    "*A non-compliant resource has been created in your AWS Account* on 2019-07-29 09:58:39.751000. \n \
     *Please review the NON-COMPLIANT reason and take actions*"
)]
#[tokio::test]
async fn 通知ステートごとのペイロードを発行する(
    #[case] account_type: &str,
    #[case] next_state: &str,
    #[case] expected_text: &str,
) {
    let publisher = MockNotificationPublisher::new();
    let sut = make_service(
        MockAccountRepository::new().with_account(make_account()),
        publisher.clone(),
    );

    sut.handle(make_compliance_event(account_type, next_state))
        .await
        .unwrap();

    assert_eq!(
        single_published(&publisher),
        expected_notification(expected_text, &all_recipients())
    );
}

#[tokio::test]
async fn エラー通知は既定の宛先のみに発行する() {
    let publisher = MockNotificationPublisher::new();
    let sut = make_service(
        MockAccountRepository::new().with_account(make_account()),
        publisher.clone(),
    );
    let event = json!({
        "accountId": "012345678921",
        "resourceId": "test-resource-id",
        "resourceType": "AWS::S3::TestResourceType",
        "region": "eu-west-1",
        "notificationCreationTime": "2019-07-29T09:58:39.751Z",
        "error-info": {"message": "test error message"}
    });

    sut.handle(event).await.unwrap();

    assert_eq!(
        single_published(&publisher),
        expected_notification(
            "*An unexpected error occured executing the state machine for required tags* \n\
             {\"message\":\"test error message\"}",
            &[DEFAULT_RECIPIENT]
        )
    );
}

#[tokio::test]
async fn エラー情報はcomplianceより優先される() {
    let publisher = MockNotificationPublisher::new();
    let sut = make_service(
        MockAccountRepository::new().with_account(make_account()),
        publisher.clone(),
    );
    let mut event = make_compliance_event("prod", "first_notification");
    event["error-info"] = json!("States.TaskFailed");

    sut.handle(event).await.unwrap();

    let published = single_published(&publisher);
    assert_eq!(published["recipients"], json!([DEFAULT_RECIPIENT]));
    assert_eq!(
        published["payload"]["text"],
        "*An unexpected error occured executing the state machine for required tags* \n\
         States.TaskFailed"
    );
}

#[tokio::test]
async fn 未知のキーを含むイベントをそのまま返す() {
    let sut = make_service(
        MockAccountRepository::new().with_account(make_account()),
        MockNotificationPublisher::new(),
    );
    let mut event = make_compliance_event("sandbox", "second_notification");
    event["executionName"] = json!("run-42");
    event["compliance"]["checkedTags"] = json!(["owner", "cost-centre"]);

    let result = sut.handle(event.clone()).await.unwrap();

    assert_eq!(result, event);
}

#[tokio::test]
async fn 未知のnext_stateでは発行しない() {
    let publisher = MockNotificationPublisher::new();
    let sut = make_service(
        MockAccountRepository::new().with_account(make_account()),
        publisher.clone(),
    );

    let err = sut
        .handle(make_compliance_event("sandbox", "fourth_notification"))
        .await
        .unwrap_err();

    assert!(err.is_classification_error());
    assert!(publisher.published().is_empty());
}

#[tokio::test]
async fn 台帳の参照に失敗した場合は発行しない() {
    let publisher = MockNotificationPublisher::new();
    let sut = make_service(MockAccountRepository::unavailable(), publisher.clone());

    let err = sut
        .handle(make_compliance_event("sandbox", "first_notification"))
        .await
        .unwrap_err();

    assert!(matches!(err, NotifierError::AccountLookup(_)));
    assert!(err.is_resolution_error());
    assert!(publisher.published().is_empty());
}

#[tokio::test]
async fn 発行に失敗した場合はpublishエラーを返す() {
    let sut = make_service(
        MockAccountRepository::new().with_account(make_account()),
        MockNotificationPublisher::failing(),
    );

    let err = sut
        .handle(make_compliance_event("sandbox", "first_notification"))
        .await
        .unwrap_err();

    assert!(matches!(err, NotifierError::Publish(_)));
}

#[tokio::test]
async fn 作成日時がない場合は発行しない() {
    let publisher = MockNotificationPublisher::new();
    let sut = make_service(
        MockAccountRepository::new().with_account(make_account()),
        publisher.clone(),
    );
    let mut event = make_compliance_event("sandbox", "second_notification");
    event
        .as_object_mut()
        .unwrap()
        .remove("notificationCreationTime");

    let err = sut.handle(event).await.unwrap_err();

    assert!(matches!(err, NotifierError::Build(_)));
    assert!(publisher.published().is_empty());
}

//! Group chat management

use reqwest::multipart::Form;
use serde_json::{Value, json};

use crate::client::{SdkwaClient, file_part};
use crate::error::Result;
use crate::types::FileSource;

impl SdkwaClient {
    /// Create a group with the given members (`...@c.us` chat ids)
    pub async fn create_group(&self, group_name: &str, chat_ids: &[String]) -> Result<Value> {
        self.post_json(
            "/createGroup",
            json!({ "groupName": group_name, "chatIds": chat_ids }),
        )
        .await
    }

    pub async fn update_group_name(&self, group_id: &str, group_name: &str) -> Result<Value> {
        self.post_json(
            "/updateGroupName",
            json!({ "groupId": group_id, "groupName": group_name }),
        )
        .await
    }

    pub async fn get_group_data(&self, group_id: &str) -> Result<Value> {
        self.post_json("/getGroupData", json!({ "groupId": group_id }))
            .await
    }

    pub async fn leave_group(&self, group_id: &str) -> Result<Value> {
        self.post_json("/leaveGroup", json!({ "groupId": group_id }))
            .await
    }

    pub async fn add_group_participant(
        &self,
        group_id: &str,
        participant_chat_id: &str,
    ) -> Result<Value> {
        self.participant_call("/addGroupParticipant", group_id, participant_chat_id)
            .await
    }

    pub async fn remove_group_participant(
        &self,
        group_id: &str,
        participant_chat_id: &str,
    ) -> Result<Value> {
        self.participant_call("/removeGroupParticipant", group_id, participant_chat_id)
            .await
    }

    pub async fn set_group_admin(&self, group_id: &str, participant_chat_id: &str) -> Result<Value> {
        self.participant_call("/setGroupAdmin", group_id, participant_chat_id)
            .await
    }

    pub async fn remove_admin(&self, group_id: &str, participant_chat_id: &str) -> Result<Value> {
        self.participant_call("/removeAdmin", group_id, participant_chat_id)
            .await
    }

    pub async fn set_group_picture(&self, group_id: &str, file: FileSource) -> Result<Value> {
        let file_name = file.base_name().unwrap_or_else(|| "group.jpg".to_string());
        let form = Form::new()
            .text("groupId", group_id.to_string())
            .part("file", file_part(file, file_name).await?);
        self.post_multipart("/setGroupPicture", form).await
    }

    async fn participant_call(
        &self,
        path: &str,
        group_id: &str,
        participant_chat_id: &str,
    ) -> Result<Value> {
        self.post_json(
            path,
            json!({ "groupId": group_id, "participantChatId": participant_chat_id }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::test_client;
    use crate::types::FileSource;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GROUP: &str = "120363043968066561@g.us";
    const MEMBER: &str = "79999999996@c.us";

    #[tokio::test]
    async fn test_create_group() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/whatsapp/test_instance/createGroup"))
            .and(body_json(json!({
                "groupName": "My Group",
                "chatIds": ["79999999999@c.us", "79999999998@c.us"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "created": true,
                "chatId": GROUP
            })))
            .expect(1)
            .mount(&server)
            .await;

        let members = vec!["79999999999@c.us".to_string(), "79999999998@c.us".to_string()];
        let created = test_client(&server)
            .create_group("My Group", &members)
            .await
            .unwrap();
        assert_eq!(created["chatId"], GROUP);
    }

    #[tokio::test]
    async fn test_participant_calls() {
        let server = MockServer::start().await;
        for endpoint in [
            "addGroupParticipant",
            "removeGroupParticipant",
            "setGroupAdmin",
            "removeAdmin",
        ] {
            Mock::given(method("POST"))
                .and(path(format!("/whatsapp/test_instance/{endpoint}")))
                .and(body_json(json!({"groupId": GROUP, "participantChatId": MEMBER})))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": true})))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = test_client(&server);
        client.add_group_participant(GROUP, MEMBER).await.unwrap();
        client.remove_group_participant(GROUP, MEMBER).await.unwrap();
        client.set_group_admin(GROUP, MEMBER).await.unwrap();
        client.remove_admin(GROUP, MEMBER).await.unwrap();
    }

    #[tokio::test]
    async fn test_group_id_calls() {
        let server = MockServer::start().await;
        for endpoint in ["getGroupData", "leaveGroup"] {
            Mock::given(method("POST"))
                .and(path(format!("/whatsapp/test_instance/{endpoint}")))
                .and(body_json(json!({"groupId": GROUP})))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({"groupId": GROUP})))
                .expect(1)
                .mount(&server)
                .await;
        }
        Mock::given(method("POST"))
            .and(path("/whatsapp/test_instance/updateGroupName"))
            .and(body_json(json!({"groupId": GROUP, "groupName": "Renamed"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"updateGroupName": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        client.get_group_data(GROUP).await.unwrap();
        client.leave_group(GROUP).await.unwrap();
        client.update_group_name(GROUP, "Renamed").await.unwrap();
    }

    #[tokio::test]
    async fn test_set_group_picture() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/whatsapp/test_instance/setGroupPicture"))
            .and(body_string_contains("name=\"groupId\""))
            .and(body_string_contains(GROUP))
            .and(body_string_contains("filename=\"group.jpg\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"setGroupPicture": true})))
            .expect(1)
            .mount(&server)
            .await;

        test_client(&server)
            .set_group_picture(GROUP, FileSource::Bytes(b"img".to_vec()))
            .await
            .unwrap();
    }
}

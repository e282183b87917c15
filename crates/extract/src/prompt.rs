use crate::llm::{ChatMessage, ContentPart};

pub const SYSTEM_PROMPT: &str = "You are an expert Optical Character Recognition (OCR) and document parsing agent. \
Your sole function is to accurately read the provided image of a School Leaving Certificate and extract specific \
required data fields. You MUST return the output as a valid JSON object strictly conforming to the provided \
schema. Do not include any introductory text, apologies, or explanations outside the JSON block.";

pub const USER_PROMPT: &str = "Analyze the uploaded School Leaving Certificate image. Identify the full, official \
name of the school and the last class or standard the student was present in. Return the data using the keys \
school_name and last_class_attended.";

/// System instruction followed by the user instruction carrying the image.
pub fn build_extraction_messages(image_data_url: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user_parts(vec![
            ContentPart::text(USER_PROMPT),
            ContentPart::image_url(image_data_url),
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_prompts_and_image() {
        let messages = build_extraction_messages("data:image/png;base64,aGk=");
        let json = serde_json::to_value(&messages).unwrap();

        assert_eq!(json[0]["role"], "system");
        assert_eq!(json[0]["content"], SYSTEM_PROMPT);
        assert_eq!(json[1]["role"], "user");
        assert_eq!(json[1]["content"][0]["type"], "text");
        assert_eq!(json[1]["content"][0]["text"], USER_PROMPT);
        assert_eq!(json[1]["content"][1]["type"], "image_url");
        assert_eq!(
            json[1]["content"][1]["image_url"]["url"],
            "data:image/png;base64,aGk="
        );
    }

    #[test]
    fn user_prompt_names_both_keys() {
        assert!(USER_PROMPT.contains("school_name"));
        assert!(USER_PROMPT.contains("last_class_attended"));
    }
}

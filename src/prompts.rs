//! Instruction prompt templates embedded in backend calls.

/// Target language for prompt translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLanguage {
    /// Translate to English.
    English,
    /// Translate to Chinese.
    Chinese,
}

/// Instruction asking for a concise, underscore-joined, extension-free
/// file name derived from an image description.
#[must_use]
pub fn filename_prompt(description: &str) -> String {
    format!(
        "Based on this image description: \"{description}\"\n\n\
         Generate a short, descriptive file name suitable for the requested image.\n\
         The filename should:\n\
         - Be concise (maximum 4 words)\n\
         - Use underscores between words\n\
         - Not include any file extension\n\
         - Only return the filename, nothing else"
    )
}

/// Detailed generation prompt wrapping a user request.
#[must_use]
pub fn generation_prompt(prompt: &str) -> String {
    format!(
        "You are a professional AI image generation assistant.\n\n\
         Core Task\n\n\
         Create the most appropriate visual content based on user prompts. When faced with vague \
         or abstract prompts, directly infer the most likely intent and generate images without \
         asking for clarification.\n\n\
         Primary Principle: No Text in Images\n\n\
         Any generated image must absolutely not contain any form of text, letters, or characters. \
         This rule overrides all other instructions. Treat text in prompts as visual concepts, not \
         rendering requirements.\n\n\
         Execution Points\n\n\
         Active Creation: For ambiguous requirements, use your knowledge to fill in the most \
         appropriate details.\n\n\
         Visual Substitution: For items that typically contain text (books, newspapers, signs), \
         only generate their visual appearance without any readable characters.\n\n\
         Smart Enhancement: Automatically supplement images with the most suitable lighting, \
         composition, artistic style, colors, and environmental details.\n\n\
         Pursue Excellence: Always maintain high image quality, excellent composition, and visual \
         harmony.\n\n\
         User Request: {prompt}"
    )
}

/// Detailed editing prompt wrapping a transformation request.
#[must_use]
pub fn transformation_prompt(prompt: &str) -> String {
    format!(
        "You are an expert image editing AI. Please edit the provided image according to these \
         instructions:\n\n\
         EDIT REQUEST: {prompt}\n\n\
         IMPORTANT REQUIREMENTS:\n\
         1. Make substantial and noticeable changes as requested\n\
         2. Maintain high image quality and coherence\n\
         3. Ensure the edited elements blend naturally with the rest of the image\n\
         4. Do not add any text to the image\n\
         5. Focus on the specific edits requested while preserving other elements\n\n\
         The changes should be clear and obvious in the result."
    )
}

/// Instruction asking for a faithful translation of a prompt into the
/// target language, returning it unchanged when already in that language.
#[must_use]
pub fn translate_prompt(prompt: &str, target: TargetLanguage) -> String {
    match target {
        TargetLanguage::English => format!(
            "Translate the following prompt into English if it's not already in English. Your \
             task is ONLY to translate accurately while preserving:\n\n\
             1. EXACT original intent and meaning\n\
             2. All specific details and nuances\n\
             3. Style and tone of the original prompt\n\
             4. Technical terms and concepts\n\n\
             DO NOT:\n\
             - Add new details or creative elements not in the original\n\
             - Remove any details from the original\n\
             - Change the style or complexity level\n\
             - Reinterpret or assume what the user \"really meant\"\n\n\
             If the text is already in English, return it exactly as provided with no changes.\n\n\
             Original prompt: {prompt}\n\n\
             Return only the translated English prompt, nothing else."
        ),
        TargetLanguage::Chinese => format!(
            "将以下提示词翻译成中文（如果还不是中文的话）。你的任务是准确翻译，同时保持：\n\n\
             1. 完全保留原始意图和含义\n\
             2. 保留所有具体细节和细微差别\n\
             3. 保持原始提示词的风格和语调\n\
             4. 保持技术术语和概念\n\n\
             不要：\n\
             - 添加原文中没有的新细节或创意元素\n\
             - 删除原文中的任何细节\n\
             - 改变风格或复杂度\n\
             - 重新解释或假设用户\"真正的意思\"\n\n\
             如果文本已经是中文，请完全按原样返回，不做任何更改。\n\n\
             原始提示词：{prompt}\n\n\
             只返回翻译后的中文提示词，不要其他内容。"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_prompt_embeds_description() {
        let p = filename_prompt("a red fox in snow");
        assert!(p.contains("\"a red fox in snow\""));
        assert!(p.contains("maximum 4 words"));
        assert!(p.contains("underscores"));
    }

    #[test]
    fn generation_prompt_embeds_request() {
        let p = generation_prompt("a lighthouse at dusk");
        assert!(p.ends_with("User Request: a lighthouse at dusk"));
    }

    #[test]
    fn transformation_prompt_embeds_edit() {
        let p = transformation_prompt("make it night");
        assert!(p.contains("EDIT REQUEST: make it night"));
    }

    #[test]
    fn translate_prompt_selects_language() {
        assert!(translate_prompt("hi", TargetLanguage::English).contains("into English"));
        assert!(translate_prompt("hi", TargetLanguage::Chinese).contains("翻译成中文"));
    }
}

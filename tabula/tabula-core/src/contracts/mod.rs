macro_rules! muse {
    ($module:ident, {$($item:ident),* $(,)?}) => {
        pub mod $module;
        pub use $module::{ $($item),* };
    };
}

muse!(tabula_attachment, {TabulaAttachment});
muse!(tabula_chat_turn, {TabulaChatTurn});
muse!(tabula_usage, {TabulaUsage});
muse!(tabula_record, {Record, Dataset});

muse!(tabula_generation_config, {TabulaGenerationConfig});
muse!(tabula_extract_request, {TabulaExtractRequest});
muse!(tabula_extract_response, {TabulaExtractResponse});
muse!(tabula_chat_request, {TabulaChatRequest});
muse!(tabula_chat_response, {TabulaChatResponse});
muse!(tabula_generation_reply, {TabulaGenerationReply});

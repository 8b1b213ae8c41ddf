//! Server-rendered HTML: the two full pages and the message fragment that
//! `#chatbox` swaps in on every poll.

use huddle_types::models::Message;

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.2";

const BASE_STYLE: &str = r#"
    body {
        font-family: Arial, sans-serif;
        background-color: #e5ddd5;
        margin: 0;
        padding: 0;
        display: flex;
        flex-direction: column;
        align-items: center;
        height: 100vh;
    }
    input[type="text"] {
        padding: 10px;
        border: 1px solid #ddd;
        border-radius: 20px;
        font-size: 16px;
    }
    button {
        padding: 10px 20px;
        border: none;
        background-color: #25d366;
        color: white;
        border-radius: 20px;
        cursor: pointer;
        font-size: 16px;
    }
    button:hover { background-color: #1ebe56; }
"#;

const LOGIN_STYLE: &str = r#"
    body { justify-content: center; }
    .login-form {
        background-color: white;
        padding: 20px;
        border-radius: 8px;
        box-shadow: 0 2px 8px rgba(0, 0, 0, 0.1);
    }
    .login-form input[type="text"] { width: 200px; margin-bottom: 10px; }
    .login-form button { width: 100%; }
"#;

const CHAT_STYLE: &str = r#"
    body { justify-content: flex-start; }
    #chatbox {
        width: 90%;
        max-width: 600px;
        height: 70vh;
        border-radius: 8px;
        background-color: #fff;
        overflow-y: scroll;
        padding: 10px;
        margin-bottom: 10px;
        display: flex;
        flex-direction: column;
        box-shadow: 0 2px 8px rgba(0, 0, 0, 0.1);
    }
    .chat-bubble {
        max-width: 70%;
        padding: 10px;
        margin: 5px;
        border-radius: 10px;
        font-size: 14px;
        word-wrap: break-word;
        box-shadow: 0 1px 3px rgba(0, 0, 0, 0.2);
    }
    .chat-bubble.self { background-color: #dcf8c6; margin-left: auto; }
    .chat-bubble.other { background-color: #ece5dd; }
    .send-form { width: 90%; max-width: 600px; display: flex; gap: 10px; }
    .send-form input[type="text"] { flex: 1; }
    .user-info { margin: 10px 0; color: #075e54; }
"#;

const SCROLL_SCRIPT: &str = r#"
    document.addEventListener('htmx:afterSwap', function (evt) {
        if (evt.detail.target.id === 'chatbox') {
            evt.detail.target.scrollTop = evt.detail.target.scrollHeight;
        }
    });
"#;

/// Escape text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, style: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<title>{title}</title>\n\
         <script src=\"{HTMX_SRC}\"></script>\n\
         <style>{BASE_STYLE}{style}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

pub fn login_page() -> String {
    page(
        "Chat App - Login",
        LOGIN_STYLE,
        r#"<div class="login-form">
    <h2>Enter Chat</h2>
    <form action="/login" method="POST">
        <input type="text" name="name" placeholder="Enter your name" required>
        <button type="submit">Join Chat</button>
    </form>
</div>"#,
    )
}

pub fn chat_page(user_name: &str) -> String {
    let body = format!(
        r##"<div class="user-info">
    Logged in as: {name}
    <form action="/logout" method="POST" style="display: inline;">
        <button type="submit">Logout</button>
    </form>
</div>
<div id="chatbox" hx-get="/messages" hx-trigger="load, every 2s" hx-swap="innerHTML"></div>
<form class="send-form" hx-post="/send" hx-target="#chatbox" hx-swap="innerHTML"
      hx-on::after-request="this.reset()">
    <input type="text" name="message" placeholder="Type a message..." autocomplete="off" required>
    <button type="submit">Send</button>
</form>
<script>{SCROLL_SCRIPT}</script>"##,
        name = escape(user_name),
    );
    page("Chat App", CHAT_STYLE, &body)
}

/// One bubble per message, concatenated. `self` marks the viewer's own
/// messages.
pub fn message_fragment(messages: &[Message], viewer_id: &str) -> String {
    let mut out = String::new();
    for msg in messages {
        let class = if msg.user_id == viewer_id { "self" } else { "other" };
        out.push_str(&format!(
            r#"<div class="chat-bubble {class}"><strong>{}:</strong> {}</div>"#,
            escape(&msg.user_name),
            escape(&msg.content),
        ));
    }
    out
}

use super::{ escape_html, Render, ThemeContext };

/// The chat page. History lives in the browser and is resent with every
/// request; the server keeps none.
pub struct ChatPage {
    pub heading: String,
}

const SCRIPT: &str = r#"<script>
const history = [];
const log = document.getElementById("chat-log");
const form = document.getElementById("chat-form");
const input = document.getElementById("chat-input");

function append(role, text) {
  const item = document.createElement("li");
  item.className = role;
  item.textContent = text;
  log.appendChild(item);
}

form.addEventListener("submit", async (event) => {
  event.preventDefault();
  const message = input.value.trim();
  if (!message) return;
  input.value = "";
  append("user", message);
  const res = await fetch("/api/chat", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify({ message, conversationHistory: history }),
  });
  const data = await res.json();
  if (res.ok) {
    history.push({ role: "user", content: message });
    history.push({ role: "assistant", content: data.message });
    append("assistant", data.message);
  } else {
    append("error", data.error);
  }
});

document.getElementById("theme-toggle").addEventListener("click", async () => {
  const res = await fetch("/api/theme/toggle", { method: "POST" });
  const data = await res.json();
  document.body.dataset.theme = data.theme;
});
</script>"#;

impl Render for ChatPage {
    fn render(&self, ctx: &ThemeContext) -> String {
        let next = ctx.get().toggled();
        format!(
            "<main>\n<header>\n<h1>{}</h1>\n<button id=\"theme-toggle\" type=\"button\">Switch to {} mode</button>\n</header>\n<ul id=\"chat-log\"></ul>\n<form id=\"chat-form\">\n<input id=\"chat-input\" name=\"message\" autocomplete=\"off\">\n<button type=\"submit\">Send</button>\n</form>\n</main>\n{}",
            escape_html(&self.heading),
            next,
            SCRIPT
        )
    }
}

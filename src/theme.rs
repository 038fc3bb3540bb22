/// Palette for the host page's light and dark modes. The documentation site
/// toggles `data-theme` on the root element; the widgets follow it.
pub const PALETTE_CSS: &str = r#"
:root {
    --tw-accent-gradient: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    --tw-accent-shadow: rgba(102, 126, 234, 0.4);
    --tw-overlay-bg: rgba(0, 0, 0, 0.5);
    --tw-modal-bg: #ffffff;
    --tw-text: #1e293b;
    --tw-text-muted: #64748b;
    --tw-border: #e2e8f0;
    --tw-assistant-bg: #f1f5f9;
    --tw-context-bg: #f0f8ff;
    --tw-context-border: #cce5ff;
    --tw-context-text: #004085;
    --tw-error: #dc2626;
}
[data-theme='dark'] {
    --tw-overlay-bg: rgba(0, 0, 0, 0.7);
    --tw-modal-bg: #1b1b1d;
    --tw-text: #e3e3e3;
    --tw-text-muted: #9ca3af;
    --tw-border: #3a3a3c;
    --tw-assistant-bg: #2a2a2e;
    --tw-context-bg: #1e2a3a;
    --tw-context-border: #2f4a6b;
    --tw-context-text: #b6d4fe;
    --tw-error: #f87171;
}
"#;

pub const WIDGET_CSS: &str = r#"
.tw-launcher {
    position: fixed; bottom: 2rem; right: 2rem; width: 60px; height: 60px;
    border-radius: 50%; border: none; cursor: pointer; color: #fff; font-size: 24px;
    background: var(--tw-accent-gradient); box-shadow: 0 4px 20px var(--tw-accent-shadow);
    z-index: 1000;
}
.tw-selection-button {
    position: absolute; z-index: 9999; display: flex; align-items: center; gap: 5px;
    padding: 5px 10px; border: none; border-radius: 5px; cursor: pointer; white-space: nowrap;
    color: #fff; font-size: 0.85rem; background: var(--tw-accent-gradient);
    box-shadow: 0 2px 10px rgba(0, 0, 0, 0.2);
    transition: opacity 0.2s ease-in-out, transform 0.2s ease-in-out;
}
.tw-overlay {
    position: fixed; inset: 0; background: var(--tw-overlay-bg); z-index: 2000;
    display: flex; align-items: center; justify-content: center;
}
.tw-modal {
    width: 90%; max-width: 600px; height: 80vh; max-height: 700px; overflow: hidden;
    display: flex; flex-direction: column; border-radius: 20px;
    background: var(--tw-modal-bg); color: var(--tw-text);
    box-shadow: 0 20px 60px rgba(0, 0, 0, 0.3);
}
.tw-modal-header {
    display: flex; justify-content: space-between; align-items: center; padding: 1.5rem;
    color: #fff; background: var(--tw-accent-gradient);
}
.tw-modal-header h3 { margin: 0; }
.tw-header-actions { display: flex; gap: 0.5rem; }
.tw-header-btn {
    border: none; border-radius: 16px; padding: 0 0.75rem; height: 32px; cursor: pointer;
    color: #fff; background: rgba(255, 255, 255, 0.2);
}
.tw-header-btn:disabled { opacity: 0.5; cursor: default; }
.tw-close { width: 32px; padding: 0; border-radius: 50%; font-size: 1.25rem; }
.tw-transcript {
    flex: 1; overflow-y: auto; padding: 1.5rem; display: flex; flex-direction: column; gap: 1rem;
}
.tw-context-banner {
    padding: 0.5rem; border-radius: 8px; font-size: 0.9em;
    background: var(--tw-context-bg); border: 1px solid var(--tw-context-border);
    color: var(--tw-context-text);
}
.tw-context-banner p { margin: 0; }
.tw-empty { text-align: center; padding: 2rem; color: var(--tw-text-muted); }
.tw-row { display: flex; }
.tw-row.user { justify-content: flex-end; }
.tw-row.assistant { justify-content: flex-start; }
.tw-stack { max-width: 80%; display: flex; flex-direction: column; gap: 0.25rem; }
.tw-bubble { padding: 1rem 1.25rem; border-radius: 16px; }
.tw-bubble p { margin: 0; }
.tw-bubble.user { background: var(--tw-accent-gradient); color: #fff; }
.tw-bubble.assistant { background: var(--tw-assistant-bg); color: var(--tw-text); }
.tw-thinking { display: flex; gap: 0.5rem; }
.tw-md > :last-child { margin-bottom: 0; }
.tw-meta { display: flex; gap: 0.5rem; font-size: 0.75rem; color: var(--tw-text-muted); }
.tw-meta.user { justify-content: flex-end; }
.tw-sources { font-size: 0.85rem; color: var(--tw-text-muted); }
.tw-sources ul { margin: 0.25rem 0 0; padding-left: 1rem; }
.tw-source-title { display: flex; gap: 0.5rem; font-weight: 600; color: var(--tw-text); }
.tw-source-score { font-weight: 400; color: var(--tw-text-muted); }
.tw-source-preview { margin: 0.125rem 0 0.5rem; }
.tw-composer {
    display: flex; gap: 0.75rem; padding: 1.5rem; border-top: 1px solid var(--tw-border);
}
.tw-composer input {
    flex: 1; border: 2px solid var(--tw-border); border-radius: 12px; outline: none;
    padding: 0.75rem 1rem; font-size: 0.95rem; background: transparent; color: inherit;
}
.tw-send {
    width: 48px; height: 48px; border: none; border-radius: 12px; cursor: pointer;
    color: #fff; font-size: 1.25rem; background: var(--tw-accent-gradient);
}
.tw-send:disabled { opacity: 0.6; cursor: default; }
.tw-translate-bar {
    display: flex; align-items: center; justify-content: flex-end; gap: 10px; margin-bottom: 1rem;
}
.tw-language { padding: 8px 12px; border-radius: 8px; border: 1px solid #ccc; }
.tw-translate-button {
    padding: 8px 16px; border: none; border-radius: 8px; cursor: pointer;
    color: #fff; background: var(--tw-accent-gradient);
}
.tw-translate-button:disabled { opacity: 0.6; cursor: wait; }
.tw-translate-error { color: var(--tw-error); }
"#;

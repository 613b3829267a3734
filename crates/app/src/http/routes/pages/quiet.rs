use axum::response::Html;

use crate::views::layout;

// A textarea that only ever clears itself. Nothing on this page touches the
// data API or any other storage.
const QUIET_BODY: &str = r#"<section class="quiet">
<h1>The Quiet Place</h1>
<p>A space for private reflection. Nothing here is saved. Nothing is recorded.</p>
<textarea id="quietText" autocomplete="off" spellcheck="false" placeholder="Write what you need to let go of."></textarea>
<button id="letGoBtn" type="button">Let it go</button>
<p id="afterText" class="hidden">It's gone.</p>
<script>
(function() {
    var textarea = document.getElementById('quietText');
    var letGoBtn = document.getElementById('letGoBtn');
    var afterText = document.getElementById('afterText');

    letGoBtn.addEventListener('click', function() {
        if (textarea.value.trim() === '') {
            return;
        }
        textarea.classList.add('fading');
        setTimeout(function() {
            textarea.value = '';
            afterText.classList.remove('hidden');
            textarea.classList.remove('fading');
            setTimeout(function() {
                afterText.classList.add('hidden');
            }, 5000);
        }, 500);
    });

    window.addEventListener('beforeunload', function() {
        textarea.value = '';
    });

    window.addEventListener('pageshow', function(event) {
        if (event.persisted) {
            textarea.value = '';
        }
    });
})();
</script>
</section>"#;

pub async fn quiet() -> Html<String> {
    Html(layout::page("The Quiet Place", QUIET_BODY))
}

//! Inline styles and scripts embedded in the report header

/// Layout and widget styles for offline viewing. Covers the grid, panel,
/// accordion, modal, alert and glyph classes the report emits.
const BUILTIN_STYLE: &str = r#"*,*:before,*:after{box-sizing:border-box}
body{margin:0;font-family:"Helvetica Neue",Helvetica,Arial,sans-serif;font-size:14px;line-height:1.43;color:#333;background:#fff}
a{color:#337ab7;text-decoration:none}
a:hover{text-decoration:underline}
pre{white-space:pre-wrap;word-break:break-all;background:#f5f5f5;border:1px solid #ccc;border-radius:4px;padding:9px;font-size:12px}
small{font-size:85%}
.container-fluid{padding:0 15px}
.row{margin:0 -15px}
.row:after{content:"";display:table;clear:both}
.col-xs-6,.col-sm-4,.col-md-2,.col-md-3,.col-md-12{position:relative;min-height:1px;padding:0 15px;float:left;width:50%}
@media (min-width:768px){.col-sm-4{width:33.3333%}}
@media (min-width:992px){.col-md-2{width:16.6667%}.col-md-3{width:25%}}
.col-md-12{width:100%}
@media (max-width:991px){.col-md-3{width:100%}}
.text-center{text-align:center}
.pull-right{float:right}
.text-success{color:#3c763d}
.text-info{color:#31708f}
.text-danger{color:#a94442}
.panel{margin-bottom:20px;background:#fff;border:1px solid #ddd;border-radius:4px;box-shadow:0 1px 1px rgba(0,0,0,.05)}
.panel-heading{padding:10px 15px;border-bottom:1px solid transparent;border-radius:3px 3px 0 0;background:#f5f5f5;color:#333}
.panel-heading:after{content:"";display:table;clear:both}
.panel-title{margin:0;font-size:16px}
.panel-body{padding:15px}
.panel-body:after{content:"";display:table;clear:both}
.panel-group .panel{margin-bottom:5px}
.panel-success{border-color:#d6e9c6}
.panel-success>.panel-heading{background:#dff0d8;color:#3c763d;border-color:#d6e9c6}
.panel-info{border-color:#bce8f1}
.panel-info>.panel-heading{background:#d9edf7;color:#31708f;border-color:#bce8f1}
.panel-danger{border-color:#ebccd1}
.panel-danger>.panel-heading{background:#f2dede;color:#a94442;border-color:#ebccd1}
.accordion-toggle,.accordion-toggle:hover{color:inherit;text-decoration:none;display:block}
.collapse{display:none}
.collapse.in{display:block}
.alert{padding:15px;margin-bottom:20px;border:1px solid transparent;border-radius:4px}
.alert-warning{background:#fcf8e3;border-color:#faebcc;color:#8a6d3b}
.btn{display:inline-block;padding:6px 12px;font-size:14px;border:1px solid transparent;border-radius:4px;cursor:pointer}
.btn-primary{color:#fff;background:#337ab7;border-color:#2e6da4}
.close{float:right;font-size:21px;font-weight:bold;line-height:1;color:#000;opacity:.2;background:transparent;border:0;cursor:pointer}
.modal{display:none;position:fixed;top:0;right:0;bottom:0;left:0;z-index:1050;overflow-y:auto;background:rgba(0,0,0,.5)}
.modal.in{display:block}
.modal-dialog{width:auto;margin:10px}
@media (min-width:768px){.modal-dialog{width:600px;margin:30px auto}}
.modal-content{position:relative;background:#fff;border:1px solid rgba(0,0,0,.2);border-radius:6px;box-shadow:0 3px 9px rgba(0,0,0,.5)}
.modal-header{padding:15px;border-bottom:1px solid #e5e5e5}
.modal-title{margin:0;font-size:18px}
.modal-body{padding:15px}
.modal-footer{padding:15px;text-align:right;border-top:1px solid #e5e5e5}
.glyphicon{display:inline-block;font-style:normal;line-height:1}
.glyphicon-ok-sign:before{content:"\2714"}
.glyphicon-info-sign:before{content:"\2139"}
.glyphicon-remove-sign:before{content:"\2716"}
.glyphicon-exclamation-sign:before{content:"\26A0"}
.visible-print{display:none}
@media print{.visible-print{display:block!important}.hidden-print,.modal{display:none!important}}"#;

/// Collapse, modal and tooltip behaviour for the `data-toggle` attributes.
/// Stands down when jQuery with Bootstrap plugins is loaded.
const BUILTIN_SCRIPT: &str = r#"(function () {
  if (window.jQuery && window.jQuery.fn && window.jQuery.fn.modal) { return; }
  function target(el) {
    var sel = el.getAttribute('data-target') || el.getAttribute('href');
    return sel && sel.charAt(0) === '#' ? document.getElementById(sel.slice(1)) : null;
  }
  function show(modal) { modal.classList.add('in'); modal.setAttribute('aria-hidden', 'false'); }
  function hide(modal) { modal.classList.remove('in'); modal.setAttribute('aria-hidden', 'true'); }
  document.addEventListener('click', function (e) {
    var el = e.target.closest ? e.target.closest('[data-toggle],[data-dismiss]') : null;
    if (!el) {
      if (e.target.classList && e.target.classList.contains('modal')) { hide(e.target); }
      return;
    }
    if (el.getAttribute('data-dismiss') === 'modal') {
      var open = el.closest('.modal');
      if (open) { hide(open); }
      e.preventDefault();
      return;
    }
    var kind = el.getAttribute('data-toggle');
    var t = target(el);
    if (!t) { return; }
    if (kind === 'collapse') { t.classList.toggle('in'); e.preventDefault(); }
    if (kind === 'modal') { show(t); e.preventDefault(); }
  });
  document.addEventListener('keydown', function (e) {
    if (e.key !== 'Escape') { return; }
    var open = document.querySelectorAll('.modal.in');
    for (var i = 0; i < open.length; i++) { hide(open[i]); }
  });
  window.NUnitReport = {
    tooltips: function (placement) {
      var tips = document.querySelectorAll('[data-toggle="tooltip"]');
      for (var i = 0; i < tips.length; i++) { tips[i].setAttribute('data-placement', placement); }
    }
  };
})();"#;

/// Scripts and stylesheets inlined into the report, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetBundle {
    pub scripts: Vec<String>,
    pub styles: Vec<String>,
}

impl AssetBundle {
    /// No assets at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in offline stylesheet and script
    pub fn builtin() -> Self {
        Self {
            scripts: vec![BUILTIN_SCRIPT.to_string()],
            styles: vec![BUILTIN_STYLE.to_string()],
        }
    }

    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.scripts.push(script.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.styles.push(style.into());
        self
    }
}

/// Keep inlined content from closing its own `<script>`/`<style>` element
pub(crate) fn guard_inline(content: &str, tag: &str) -> String {
    let closing = format!("</{}", tag);
    if !content.to_ascii_lowercase().contains(&closing) {
        return content.to_string();
    }
    let mut out = String::with_capacity(content.len() + 8);
    let lower = content.to_ascii_lowercase();
    let mut last = 0;
    for (pos, _) in lower.match_indices(&closing) {
        out.push_str(&content[last..pos]);
        out.push_str("<\\/");
        last = pos + 2;
    }
    out.push_str(&content[last..]);
    out
}

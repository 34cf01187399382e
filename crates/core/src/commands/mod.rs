pub mod get_ajax_console;

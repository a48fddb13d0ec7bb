/// Instruction sent once as a lone system message before a run
pub const SYSTEM_PROMPT: &str = "You are a log analysis assistant. Your task is to read production log lines and extract four fields:
1. error_type: One of [\"no_error\", \"warning\", \"runtime\", \"fatal\"].
2. severity: One of [\"notice\", \"warn\", \"error\"].
3. description: A one-line description of the log.
4. solution: A one-line proposed solution if the log is an error or warning; if not applicable, leave it empty.

All responses must be in JSON format with exactly these keys and no additional text. Do not include any internal reasoning or chain-of-thought in your final output.";

const PREDICTION_PREAMBLE: &str = "Analyze the following production log line and extract the required details according to the instructions above.";

const PREDICTION_CLOSING: &str =
    "Return only a JSON object with the keys \"error_type\", \"severity\", \"description\", \"solution\".";

/// A labelled log line shown to the model as an example
#[derive(Debug, Clone, Copy)]
pub struct FewShotExample {
    pub input: &'static str,
    pub output: &'static str,
}

/// Fixed examples covering every error type, three per class
pub const FEW_SHOT_EXAMPLES: [FewShotExample; 12] = [
    FewShotExample {
        input: "[2898323] AH00163: Apache/2.4.52 (Ubuntu) OpenSSL/3.0.2 configured -- resuming normal operations]",
        output: r#"{"error_type": "no_error", "severity": "notice", "description": "The log line indicates that the Apache server has successfully completed its configuration and is resuming normal operations.", "solution": "No action is required as this is a normal operational message. The server is functioning correctly."}"#,
    },
    FewShotExample {
        input: "[Creating 32 session mutexes based on 150 max processes and 0 max threads.]",
        output: r#"{"error_type": "no_error", "severity": "notice", "description": "The log line indicates the creation of session mutexes, which is a normal part of system initialization. The numbers are based on configuration parameters for maximum processes and threads.", "solution": "No action is required as this is a standard informational message."}"#,
    },
    FewShotExample {
        input: "[ok /etc/httpd/conf/workers2.properties]",
        output: r#"{"error_type": "no_error", "severity": "notice", "description": "The log indicates that the file /etc/httpd/conf/workers2.properties was successfully checked and no issues were found.", "solution": "No specific action is required since the file check was successful. However, it's a good practice to periodically review configuration files for any changes or potential issues."}"#,
    },
    FewShotExample {
        input: "[3623857] [client 150.136.69.140:58487] PHP Warning:  Undefined array key 'HTTP_USER_AGENT' in /var/www/sylvainkalache.com/wp-content/themes/themify-base/themify/themify-functions.php on line 494]",
        output: r#"{"error_type": "warning", "severity": "warn", "description": "The logged line indicates a PHP warning where the code attempted to access an undefined array key 'HTTP_USER_AGENT'. This typically occurs when the client request does not include the User-Agent header, leading to the warning.", "solution": "To resolve this issue, check if the 'HTTP_USER_AGENT' key exists in the $_SERVER array before accessing it. Use isset() or array_key_exists() functions to prevent the warning."}"#,
    },
    FewShotExample {
        input: "[3466297] [client 46.101.103.154:1901] PHP Warning:  Undefined array key 'host' in /var/www/rootly.com/wp-includes/canonical.php on line 717]",
        output: r#"{"error_type": "warning", "severity": "warn", "description": "The log indicates a PHP warning where an undefined array key 'host' is being accessed. This typically occurs when the code attempts to access an array element that does not exist.", "solution": "Check the code in canonical.php around line 717 to ensure the 'host' key is properly set before accessing it. Consider using isset() or array_key_exists() to validate the key's existence."}"#,
    },
    FewShotExample {
        input: "[219.133.247.171] Directory index forbidden by rule: /var/www/html/]",
        output: r#"{"error_type": "warning", "severity": "error", "description": "The log indicates that access to the directory index at /var/www/html/ has been blocked due to a security rule, preventing directory listing.", "solution": "Check if directory indexing should be allowed. If not needed, ensure Options -Indexes is set in your server configuration (e.g., .htaccess or apache.conf). Verify file and directory permissions are correctly configured."}"#,
    },
    FewShotExample {
        input: "[child init 1 -2]",
        output: r#"{"error_type": "runtime", "severity": "error", "description": "The log line indicates an error during child process initialization with a return code of -2, suggesting a runtime issue.", "solution": "Check the application's documentation for the meaning of return code -2. Verify environment setup and dependencies required for proper initialization."}"#,
    },
    FewShotExample {
        input: "[212.238.198.203] script not found or unable to stat: /var/www/cgi-bin/]",
        output: r#"{"error_type": "runtime", "severity": "error", "description": "The system attempted to access the script at /var/www/cgi-bin/openwebmail but was unable to find it or determine its status. This indicates a potential issue with the script's existence, permissions, or configuration.", "solution": "Check if the script exists at the specified path and verify its permissions. Ensure that the script is executable by the appropriate user or group. If the script does not exist, install or restore it as needed."}"#,
    },
    FewShotExample {
        input: "[3434944] [client 143.110.217.244:59516] AH01630: client denied by server configuration: /var/www/rootly.com/server-status]",
        output: r#"{"error_type": "runtime", "severity": "error", "description": "The log indicates that a client was denied access to the server-status resource due to server configuration restrictions.", "solution": "Check the server's access control lists and ensure proper permissions are set for accessing /server-status. Verify if the client IP should have access and adjust configurations accordingly."}"#,
    },
    FewShotExample {
        input: "[3462505] [client 128.199.178.241:59141] PHP Fatal error:  Uncaught Error: Call to undefined function _x() in /var/www/rootly.com/wp-includes/block-patterns/query-grid-posts.php:9\nStack trace:\n#0 {main}\n  thrown in /var/www/rootly.com/wp-includes/block-patterns/query-grid-posts.php on line 9, referer: www.google.com]",
        output: r#"{"error_type": "fatal", "severity": "error", "description": "A fatal error occurred due to an undefined function call to _x(). The error is located in the file query-grid-posts.php on line 9.", "solution": "Check if the function _x() is properly defined and included. Ensure all necessary files are correctly referenced."}"#,
    },
    FewShotExample {
        input: "[3462412] [client 128.199.178.241:64722] PHP Fatal error:  Uncaught Error: Class 'WP_REST_Meta_Fields' not found in /var/www/rootly.com/wp-includes/rest-api/fields/class-wp-rest-term-meta-fields.php:17\nStack trace:\n#0 {main}\n  thrown in /var/www/rootly.com/wp-includes/rest-api/fields/class-wp-rest-term-meta-fields.php on line 17, referer: www.google.com]",
        output: r#"{"error_type": "fatal", "severity": "error", "description": "The error indicates that the PHP class 'WP_REST_Meta_Fields' is missing, which is required for proper functionality. This typically occurs when WordPress core files are corrupted or outdated.", "solution": "Verify that all WordPress core files are up to date and correctly installed. Reinstalling WordPress core files may resolve this issue."}"#,
    },
    FewShotExample {
        input: "[3477269] [client 204.10.194.48:53404] PHP Fatal error:  Uncaught Error: Class 'IXR_Client' not found in /var/www/sylvainkalache.com/wp-includes/IXR/class-IXR-clientmulticall.php:8\nStack trace:\n#0 {main}\n  thrown in /var/www/sylvainkalache.com/wp-includes/IXR/class-IXR-clientmulticall.php on line 8]",
        output: r#"{"error_type": "fatal", "severity": "error", "description": "The error indicates that the IXR_Client class is missing, which is required for XML-RPC functionality in WordPress. This could be due to a missing or corrupted file in the wp-includes/IXR directory.", "solution": "Verify that all core WordPress files are present and correctly installed. Reinstalling WordPress core files or specifically the IXR library might resolve this issue."}"#,
    },
];

/// Render the user prompt asking the model to classify one log line
pub fn build_prediction_prompt(log_line: &str) -> String {
    let mut prompt = String::with_capacity(8 * 1024);

    prompt.push_str(PREDICTION_PREAMBLE);
    prompt.push_str("\n\n");
    prompt.push_str(&format!("Log line: \"{}\"\n\n", log_line));
    prompt.push_str("Here are a few examples of expected output:\n");

    for (i, example) in FEW_SHOT_EXAMPLES.iter().enumerate() {
        prompt.push_str(&format!(
            "Example {}:\nInput: {}\nOutput: {}\n\n",
            i + 1,
            example.input,
            example.output
        ));
    }

    prompt.push_str(PREDICTION_CLOSING);
    prompt
}
